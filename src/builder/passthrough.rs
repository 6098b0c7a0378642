use std::path::Path;

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::utils::error::{BoxResult, SiteError};
use crate::utils::fs::copy_file;

/// Copy the passthrough files and directories to the same relative path in
/// the output directory. Missing entries are skipped. Returns files copied.
pub fn copy_passthrough(config: &Config) -> BoxResult<usize> {
    let input = config.input_dir();
    let output = config.output_dir();
    let mut copied_count = 0;

    for entry in &config.passthrough {
        let source = input.join(entry);
        let destination = output.join(entry);

        if !source.exists() {
            warn!("Passthrough entry not found, skipping: {}", source.display());
            continue;
        }

        copied_count += copy_tree(&source, &destination)?;
    }

    info!("Copied {} passthrough files", copied_count);
    Ok(copied_count)
}

/// Copy a file, or every file below a directory
fn copy_tree(source: &Path, destination: &Path) -> BoxResult<usize> {
    let mut copied_count = 0;

    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.map_err(|e| SiteError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel_path = entry.path().strip_prefix(source).unwrap_or(Path::new(""));
        let dest_path = if rel_path.as_os_str().is_empty() {
            destination.to_path_buf()
        } else {
            destination.join(rel_path)
        };

        copy_file(entry.path(), &dest_path)?;
        debug!("Copied {} -> {}", entry.path().display(), dest_path.display());
        copied_count += 1;
    }

    Ok(copied_count)
}
