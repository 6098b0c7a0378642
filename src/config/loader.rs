use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::types::Config;
use crate::config::validation;
use crate::utils::error::{BoxResult, SiteError};

/// Configuration file names looked up in the project root, first match wins
pub const CONFIG_FILES: [&str; 4] = [
    "sitewright.yml",
    "sitewright.yaml",
    "sitewright.toml",
    "sitewright.json",
];

/// Load the site configuration for the project rooted at `root`.
///
/// An explicit `config_file` takes precedence over the default file names.
/// Without any configuration file the defaults are used.
pub fn load_config<P: AsRef<Path>>(root: P, config_file: Option<PathBuf>) -> BoxResult<Config> {
    let root = root.as_ref();

    let config_path = match config_file {
        Some(path) => Some(path),
        None => find_default_config_file(root),
    };

    let mut config = match config_path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            parse_config_file(&path)?
        }
        None => {
            debug!("No configuration file found in {}, using defaults", root.display());
            Config::with_root(root)
        }
    };

    config.root = root.to_path_buf();

    validation::validate_config(&config)?;

    debug!("Configuration loaded: {:?}", config);
    Ok(config)
}

fn find_default_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

/// Parse a configuration file, picking the format from its extension
fn parse_config_file(config_path: &Path) -> BoxResult<Config> {
    if !config_path.exists() {
        return Err(SiteError::Config(format!(
            "Configuration file not found: {}", config_path.display()
        )).into());
    }

    let content = fs::read_to_string(config_path).map_err(|e| SiteError::Config(format!(
        "Failed to read configuration file {}: {}", config_path.display(), e
    )))?;

    let ext = config_path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "yml".to_string());

    match ext.as_str() {
        "yml" | "yaml" => parse_yaml_config(&content, config_path),
        "toml" => parse_toml_config(&content, config_path),
        "json" => parse_json_config(&content, config_path),
        other => Err(SiteError::Config(format!(
            "Unsupported configuration file format: {}", other
        )).into()),
    }
}

fn parse_yaml_config(content: &str, path: &Path) -> BoxResult<Config> {
    // An empty YAML document is valid and means "all defaults"
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    serde_yaml::from_str(content).map_err(|e| SiteError::Config(format!(
        "Failed to parse YAML configuration ({}): {}", path.display(), e
    )).into())
}

fn parse_toml_config(content: &str, path: &Path) -> BoxResult<Config> {
    toml::from_str(content).map_err(|e| SiteError::Config(format!(
        "Failed to parse TOML configuration ({}): {}", path.display(), e
    )).into())
}

fn parse_json_config(content: &str, path: &Path) -> BoxResult<Config> {
    serde_json::from_str(content).map_err(|e| SiteError::Config(format!(
        "Failed to parse JSON configuration ({}): {}", path.display(), e
    )).into())
}
