use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::{DirEntry, WalkDir};

use crate::builder::page::{determine_output_path, is_contained, url_for_output, Page};
use crate::config::Config;
use crate::front_matter::extract_front_matter;
use crate::utils::date::parse_datetime;
use crate::utils::error::{BoxResult, SiteError};

/// Collect every template file of the input directory
pub fn collect_pages(config: &Config) -> BoxResult<Vec<Page>> {
    debug!("Collecting pages...");
    let input = config.input_dir();
    let excluded = excluded_dirs(config);
    let mut pages = Vec::new();

    let walker = WalkDir::new(&input)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e, &excluded));

    for entry in walker {
        let entry = entry.map_err(|e| SiteError::Io(e.into()))?;
        let path = entry.path();

        if !entry.file_type().is_file() || !config.is_template_file(path) {
            continue;
        }

        let relative_path = path.strip_prefix(&input).unwrap_or(path).to_path_buf();
        pages.push(read_page(path, relative_path)?);
    }

    debug!("Collected {} pages", pages.len());
    Ok(pages)
}

/// Read a template and work out where it goes
pub fn read_page(path: &Path, relative_path: PathBuf) -> BoxResult<Page> {
    let source = fs::read_to_string(path)?;
    let (front_matter, content) = extract_front_matter(&source).map_err(|e| {
        SiteError::Generic(format!("{}: {}", path.display(), e))
    })?;

    let output_path = determine_output_path(&relative_path, &front_matter);
    if let Some(output) = output_path.as_deref().filter(|output| !is_contained(output)) {
        return Err(SiteError::Template(format!(
            "{}: permalink {} leaves the output directory",
            path.display(),
            output.display()
        ))
        .into());
    }

    let url = output_path.as_deref().map(url_for_output);
    let date = front_matter.date().and_then(parse_datetime);

    Ok(Page {
        path: path.to_path_buf(),
        relative_path,
        output_path,
        url,
        date,
        date_created: None,
        date_modified: None,
        front_matter,
        content,
    })
}

/// Special dirs plus passthrough entries, which are copied and never rendered
fn excluded_dirs(config: &Config) -> Vec<PathBuf> {
    let input = config.input_dir();
    let mut excluded = vec![
        config.output_dir(),
        config.includes_dir(),
        config.layouts_dir(),
        config.data_dir(),
    ];
    excluded.extend(config.passthrough.iter().map(|entry| input.join(entry)));
    excluded
}

/// Special directories, dot files and `node_modules` are never templates
fn is_excluded(entry: &DirEntry, excluded: &[PathBuf]) -> bool {
    if entry.depth() == 0 {
        return false;
    }

    if excluded.iter().any(|dir| entry.path().starts_with(dir)) {
        return true;
    }

    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == "node_modules"
}
