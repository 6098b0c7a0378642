use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::types::CollectionConfig;

/// Permalink symbol rendered inside heading anchors
pub const PERMALINK_SYMBOL: &str = concat!(
    r#"<i class="is-sr-only">permalink</i>"#,
    r#"<svg viewBox="0 0 512 512"><path d="M459.7 233.4L369 324c-49.8 50-131 50-181 0-7.8-8-14-16.8-19.3-26l42-42c2-2 4.5-3.2 7-4.5 2.8 10 8 19.3 15.7 27 25 25 65.5 25 90.5 0l90.4-90.4c25-24.8 25-65.4 0-90.4s-65.6-25-90.5 0l-32.3 32.2c-26-10-54.3-13-81.7-9l68.6-68.4c50-50 131-50 181 0s50 131 0 181zM220.3 382.2L188 414.4c-24.8 25-65.4 25-90.4 0s-25-65.6 0-90.5l90.5-90.6c25-25 65.7-25 90.6 0 7.8 7.8 13 17.2 15.8 27 2.4-1.3 4.8-2.4 6.8-4.4l42-42c-5.3-9.2-11.5-18-19.3-26-50-50-131.2-50-181 0l-90.6 90.6c-50 50-50 131 0 181s131 50 181 0l68.6-68.5c-27.4 4-55.6 1.3-81.7-8.8z"/></svg>"#
);

pub fn default_input_dir() -> PathBuf {
    PathBuf::from("src")
}

pub fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

pub fn default_includes_dir() -> PathBuf {
    PathBuf::from("_includes")
}

pub fn default_layouts_dir() -> PathBuf {
    PathBuf::from("_layouts")
}

pub fn default_data_dir() -> PathBuf {
    PathBuf::from("_data")
}

pub fn default_template_formats() -> Vec<String> {
    vec!["html".to_string(), "md".to_string(), "liquid".to_string()]
}

pub fn default_passthrough() -> Vec<PathBuf> {
    vec![
        PathBuf::from("assets"),
        PathBuf::from("robots.txt"),
        PathBuf::from("CNAME"),
    ]
}

pub fn default_true() -> bool {
    true
}

pub fn default_permalink_class() -> String {
    "anchor-link".to_string()
}

pub fn default_permalink_symbol() -> String {
    PERMALINK_SYMBOL.to_string()
}

pub fn default_anchor_levels() -> Vec<u8> {
    vec![2, 3, 4]
}

pub fn default_link_class() -> String {
    "external-link".to_string()
}

pub fn default_link_target() -> String {
    "_blank".to_string()
}

pub fn default_link_rel() -> String {
    "nofollow noopener noreferrer".to_string()
}

pub fn default_collections() -> HashMap<String, CollectionConfig> {
    let mut collections = HashMap::new();

    collections.insert(
        "posts".to_string(),
        CollectionConfig {
            glob: "_posts/**/*.md".to_string(),
            file_dates: true,
        },
    );

    collections
}
