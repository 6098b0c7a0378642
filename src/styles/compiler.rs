use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::info;

use crate::config::SassStyle;
use crate::utils::error::{BoxResult, SiteError};

/// Result of one stylesheet compilation
#[derive(Debug, Clone)]
pub struct CompileStats {
    pub output: PathBuf,
    pub bytes: usize,
}

/// Compile the Sass entry file `input` to `output`, creating the output
/// directory when it is missing.
pub fn compile_stylesheet(input: &Path, output: &Path, style: SassStyle) -> BoxResult<CompileStats> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating new CSS directory: {}", parent.display());
            fs::create_dir_all(parent)?;
            info!("CSS directory created.");
        }
    }

    let start = Instant::now();

    let options = grass::Options::default().style(output_style(style));
    let css = grass::from_path(input, &options)
        .map_err(|e| SiteError::Stylesheet(format!("{}: {}", input.display(), e)))?;

    fs::write(output, &css)?;

    info!("CSS file saved: {} (in {}ms)", output.display(), start.elapsed().as_millis());

    Ok(CompileStats {
        output: output.to_path_buf(),
        bytes: css.len(),
    })
}

fn output_style(style: SassStyle) -> grass::OutputStyle {
    match style {
        SassStyle::Expanded => grass::OutputStyle::Expanded,
        SassStyle::Compressed => grass::OutputStyle::Compressed,
    }
}
