use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use crate::front_matter::{extract_front_matter, FrontMatter};
use crate::utils::error::{BoxResult, SiteError};

/// A layout template with its own front matter
#[derive(Debug, Clone)]
pub struct LayoutInfo {
    pub content: String,
    pub front_matter: FrontMatter,
}

/// Load layouts, reachable both as `post.html` and `post`
pub fn load_layouts(layouts_dir: &Path) -> BoxResult<HashMap<String, LayoutInfo>> {
    let mut layouts = HashMap::new();

    for (relative, path) in template_files(layouts_dir)? {
        let source = fs::read_to_string(&path)?;
        let (front_matter, content) = extract_front_matter(&source).map_err(|e| {
            SiteError::Generic(format!("Layout {}: {}", path.display(), e))
        })?;

        let layout = LayoutInfo { content, front_matter };
        for name in lookup_names(&relative) {
            layouts.entry(name).or_insert_with(|| layout.clone());
        }
    }

    debug!("Loaded {} layout names from {}", layouts.len(), layouts_dir.display());
    Ok(layouts)
}

/// Load includes as Liquid partials, reachable both as `nav.html` and `nav`
pub fn load_includes(includes_dir: &Path) -> BoxResult<HashMap<String, String>> {
    let mut includes = HashMap::new();

    for (relative, path) in template_files(includes_dir)? {
        let content = fs::read_to_string(&path)?;
        for name in lookup_names(&relative) {
            includes.entry(name).or_insert_with(|| content.clone());
        }
    }

    debug!("Loaded {} include names from {}", includes.len(), includes_dir.display());
    Ok(includes)
}

/// (relative name with forward slashes, absolute path) of every file below `dir`
fn template_files(dir: &Path) -> BoxResult<Vec<(String, std::path::PathBuf)>> {
    let mut files = Vec::new();
    if !dir.is_dir() {
        return Ok(files);
    }

    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| SiteError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join("/");

        if name.starts_with('.') || name.contains("/.") {
            continue;
        }
        files.push((name, entry.path().to_path_buf()));
    }

    Ok(files)
}

/// Full name first, then the name without extension
fn lookup_names(relative: &str) -> Vec<String> {
    let mut names = vec![relative.to_string()];
    if let Some((stem, _ext)) = relative.rsplit_once('.') {
        if !stem.is_empty() && !stem.ends_with('/') {
            names.push(stem.to_string());
        }
    }
    names
}
