pub mod external_links;

use std::fmt;
use std::path::Path;

use log::debug;

use crate::config::Config;
use crate::utils::error::{BoxResult, SiteError};

pub use external_links::LinkAnnotator;

/// A post-render content transform.
///
/// Receives the fully rendered output of a page together with the path it is
/// about to be written to, and returns the content that gets written instead.
pub trait Transform: Send + Sync {
    /// Name used in logs and error messages
    fn name(&self) -> &str;

    /// Map rendered content to the content that will be written
    fn apply(&self, content: &str, output_path: &Path) -> BoxResult<String>;
}

/// Ordered set of transforms applied to every rendered page
#[derive(Default)]
pub struct TransformRegistry {
    transforms: Vec<Box<dyn Transform>>,
}

impl TransformRegistry {
    pub fn new() -> Self {
        TransformRegistry { transforms: Vec::new() }
    }

    /// Register the transforms enabled by the site configuration
    pub fn from_config(config: &Config) -> Self {
        let mut registry = TransformRegistry::new();

        if config.external_links.enabled {
            registry.add(LinkAnnotator::new(config.external_links.clone()));
        }

        registry
    }

    /// Add a transform; it runs after every transform added before it
    pub fn add<T: Transform + 'static>(&mut self, transform: T) -> &mut Self {
        debug!("Registering transform '{}'", transform.name());
        self.transforms.push(Box::new(transform));
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }

    /// Run every transform in registration order
    pub fn apply(&self, content: &str, output_path: &Path) -> BoxResult<String> {
        let mut current = content.to_string();

        for transform in &self.transforms {
            debug!("Applying transform '{}' to {}", transform.name(), output_path.display());
            current = transform.apply(&current, output_path).map_err(|e| {
                SiteError::Template(format!(
                    "Transform '{}' failed for {}: {}",
                    transform.name(),
                    output_path.display(),
                    e
                ))
            })?;
        }

        Ok(current)
    }
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformRegistry")
            .field("transforms", &self.names())
            .finish()
    }
}
