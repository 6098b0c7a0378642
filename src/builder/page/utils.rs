use std::path::{Component, Path, PathBuf};

use crate::front_matter::{FrontMatter, Permalink};

/// Output path of a template relative to the output dir, `None` when the
/// template is not written.
///
/// `index.*` becomes `<dir>/index.html`, any other `<name>.*` becomes
/// `<dir>/<name>/index.html`. A front matter permalink overrides this; one
/// ending in `/` gets `index.html` appended.
pub fn determine_output_path(relative_path: &Path, front_matter: &FrontMatter) -> Option<PathBuf> {
    match front_matter.permalink() {
        Permalink::Disabled => None,
        Permalink::Path(permalink) => {
            let path_str = permalink.trim().trim_start_matches('/');
            if path_str.is_empty() || path_str.ends_with('/') {
                Some(PathBuf::from(path_str).join("index.html"))
            } else {
                Some(PathBuf::from(path_str))
            }
        }
        Permalink::Default => {
            let parent = relative_path.parent().unwrap_or_else(|| Path::new(""));
            let stem = relative_path.file_stem()?.to_string_lossy();

            if stem == "index" {
                Some(parent.join("index.html"))
            } else {
                Some(parent.join(&*stem).join("index.html"))
            }
        }
    }
}

/// Whether an output path stays inside the output dir. Only plain names and
/// `.` are allowed, so `..` and absolute components are rejected.
pub fn is_contained(output_path: &Path) -> bool {
    output_path
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Site URL of an output path; `index.html` is served as its directory
pub fn url_for_output(output_path: &Path) -> String {
    let segments: Vec<String> = output_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();

    match segments.split_last() {
        Some((last, dirs)) if last == "index.html" => {
            if dirs.is_empty() {
                "/".to_string()
            } else {
                format!("/{}/", dirs.join("/"))
            }
        }
        Some(_) => format!("/{}", segments.join("/")),
        None => "/".to_string(),
    }
}
