use std::collections::HashMap;
use std::path::{Path, PathBuf};

use liquid::model::Value;
use liquid::Object;
use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::liquid::convert::yaml_to_liquid;

/// Site build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Project root every configured path is resolved against
    #[serde(skip)]
    pub root: PathBuf,

    /// Input, output and special directories
    #[serde(default)]
    pub dir: DirConfig,

    /// File extensions rendered as templates
    #[serde(default = "defaults::default_template_formats")]
    pub template_formats: Vec<String>,

    /// Markdown library settings
    #[serde(default)]
    pub markdown: MarkdownConfig,

    /// Files and directories (relative to the input dir) copied verbatim
    #[serde(default = "defaults::default_passthrough")]
    pub passthrough: Vec<PathBuf>,

    /// Named collections built from globs over the input dir
    #[serde(default = "defaults::default_collections")]
    pub collections: HashMap<String, CollectionConfig>,

    /// External link transform
    #[serde(default)]
    pub external_links: ExternalLinkConfig,

    /// Sass stylesheet to compile, if any
    #[serde(default)]
    pub sass: Option<SassConfig>,

    /// Free-form site metadata, exposed to templates as `site`
    #[serde(default)]
    pub site: HashMap<String, serde_yaml::Value>,
}

/// Directory layout. `includes`, `layouts` and `data` are relative to `input`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirConfig {
    #[serde(default = "defaults::default_input_dir")]
    pub input: PathBuf,

    #[serde(default = "defaults::default_output_dir")]
    pub output: PathBuf,

    #[serde(default = "defaults::default_includes_dir")]
    pub includes: PathBuf,

    #[serde(default = "defaults::default_layouts_dir")]
    pub layouts: PathBuf,

    #[serde(default = "defaults::default_data_dir")]
    pub data: PathBuf,
}

/// Markdown rendering options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarkdownConfig {
    /// Pass raw HTML through
    #[serde(default = "defaults::default_true")]
    pub html: bool,

    /// Turn bare URLs into links
    #[serde(default = "defaults::default_true")]
    pub linkify: bool,

    /// Smart quotes and dashes
    #[serde(default = "defaults::default_true")]
    pub typographer: bool,

    /// Highlight fenced code blocks
    #[serde(default = "defaults::default_true")]
    pub highlight: bool,

    /// Heading anchors
    #[serde(default)]
    pub anchor: AnchorConfig,
}

/// Heading anchor options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnchorConfig {
    /// Add ids to headings at all
    #[serde(default = "defaults::default_true")]
    pub enabled: bool,

    /// Append a permalink anchor inside each heading
    #[serde(default = "defaults::default_true")]
    pub permalink: bool,

    #[serde(default = "defaults::default_permalink_class")]
    pub permalink_class: String,

    /// Raw HTML placed inside the permalink anchor
    #[serde(default = "defaults::default_permalink_symbol")]
    pub permalink_symbol: String,

    /// Heading levels that get anchors
    #[serde(default = "defaults::default_anchor_levels")]
    pub levels: Vec<u8>,
}

/// Configuration for a collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionConfig {
    /// Glob relative to the input dir
    pub glob: String,

    /// Decorate items with file created/modified times
    #[serde(default = "defaults::default_true")]
    pub file_dates: bool,
}

/// Attributes the external link transform guarantees on outbound anchors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExternalLinkConfig {
    #[serde(default = "defaults::default_true")]
    pub enabled: bool,

    /// Class token appended to the anchor's classes
    #[serde(default = "defaults::default_link_class")]
    pub class_name: String,

    #[serde(default = "defaults::default_link_target")]
    pub target: String,

    /// Space separated rel tokens
    #[serde(default = "defaults::default_link_rel")]
    pub rel: String,
}

/// Sass entry file and CSS output, both relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SassConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub style: SassStyle,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SassStyle {
    #[default]
    Expanded,
    Compressed,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root: PathBuf::from("."),
            dir: DirConfig::default(),
            template_formats: defaults::default_template_formats(),
            markdown: MarkdownConfig::default(),
            passthrough: defaults::default_passthrough(),
            collections: defaults::default_collections(),
            external_links: ExternalLinkConfig::default(),
            sass: None,
            site: HashMap::new(),
        }
    }
}

impl Default for DirConfig {
    fn default() -> Self {
        DirConfig {
            input: defaults::default_input_dir(),
            output: defaults::default_output_dir(),
            includes: defaults::default_includes_dir(),
            layouts: defaults::default_layouts_dir(),
            data: defaults::default_data_dir(),
        }
    }
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        MarkdownConfig {
            html: true,
            linkify: true,
            typographer: true,
            highlight: true,
            anchor: AnchorConfig::default(),
        }
    }
}

impl Default for AnchorConfig {
    fn default() -> Self {
        AnchorConfig {
            enabled: true,
            permalink: true,
            permalink_class: defaults::default_permalink_class(),
            permalink_symbol: defaults::default_permalink_symbol(),
            levels: defaults::default_anchor_levels(),
        }
    }
}

impl Default for ExternalLinkConfig {
    fn default() -> Self {
        ExternalLinkConfig {
            enabled: true,
            class_name: defaults::default_link_class(),
            target: defaults::default_link_target(),
            rel: defaults::default_link_rel(),
        }
    }
}

impl Config {
    /// Config with defaults rooted at `root`
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        Config {
            root: root.as_ref().to_path_buf(),
            ..Config::default()
        }
    }

    pub fn input_dir(&self) -> PathBuf {
        self.root.join(&self.dir.input)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.dir.output)
    }

    pub fn includes_dir(&self) -> PathBuf {
        self.input_dir().join(&self.dir.includes)
    }

    pub fn layouts_dir(&self) -> PathBuf {
        self.input_dir().join(&self.dir.layouts)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.input_dir().join(&self.dir.data)
    }

    /// Resolved (input, output) paths of the configured stylesheet
    pub fn sass_paths(&self) -> Option<(PathBuf, PathBuf)> {
        self.sass
            .as_ref()
            .map(|sass| (self.root.join(&sass.input), self.root.join(&sass.output)))
    }

    pub fn sass_style(&self) -> SassStyle {
        self.sass.as_ref().map(|sass| sass.style).unwrap_or_default()
    }

    /// Whether `path` has one of the configured template extensions
    pub fn is_template_file(&self, path: &Path) -> bool {
        match path.extension() {
            Some(ext) => {
                let ext = ext.to_string_lossy().to_lowercase();
                self.template_formats.iter().any(|f| f.eq_ignore_ascii_case(&ext))
            }
            None => false,
        }
    }

    /// The `site` table as a Liquid object
    pub fn site_to_liquid(&self) -> Object {
        let mut obj = Object::new();

        for (key, value) in &self.site {
            obj.insert(key.clone().into(), yaml_to_liquid(value.clone()));
        }

        obj
    }

    /// Liquid value for the `site` global
    pub fn site_value(&self) -> Value {
        Value::Object(self.site_to_liquid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liquid::ValueView;

    #[test]
    fn test_default_paths() {
        let config = Config::with_root("/project");

        assert_eq!(config.input_dir(), PathBuf::from("/project/src"));
        assert_eq!(config.output_dir(), PathBuf::from("/project/dist"));
        assert_eq!(config.includes_dir(), PathBuf::from("/project/src/_includes"));
        assert_eq!(config.layouts_dir(), PathBuf::from("/project/src/_layouts"));
        assert_eq!(config.data_dir(), PathBuf::from("/project/src/_data"));
        assert!(config.sass_paths().is_none());
    }

    #[test]
    fn test_template_file_detection() {
        let config = Config::default();

        assert!(config.is_template_file(Path::new("src/index.md")));
        assert!(config.is_template_file(Path::new("src/about.HTML")));
        assert!(config.is_template_file(Path::new("src/feed.liquid")));
        assert!(!config.is_template_file(Path::new("src/assets/app.js")));
        assert!(!config.is_template_file(Path::new("src/CNAME")));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str(
            "dir:\n  output: public\nexternal_links:\n  rel: noopener\n",
        )
        .unwrap();

        assert_eq!(config.dir.output, PathBuf::from("public"));
        assert_eq!(config.dir.input, PathBuf::from("src"));
        assert_eq!(config.external_links.rel, "noopener");
        assert_eq!(config.external_links.class_name, "external-link");
        assert_eq!(config.markdown.anchor.levels, vec![2, 3, 4]);
        assert!(config.collections.contains_key("posts"));
    }

    #[test]
    fn test_site_table_to_liquid() {
        let config: Config = serde_yaml::from_str("site:\n  title: My Blog\n  year: 2020\n").unwrap();
        let site = config.site_to_liquid();

        assert_eq!(site.get("title").unwrap().to_kstr().to_string(), "My Blog");
        assert_eq!(site.get("year").unwrap().to_kstr().to_string(), "2020");
    }
}
