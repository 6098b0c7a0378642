use log::{info, warn};

use crate::config::Config;
use crate::utils::error::{BoxResult, SiteError};
use crate::utils::fs;

/// Validate the configuration
pub fn validate_config(config: &Config) -> BoxResult<()> {
    validate_input_directory(config)?;
    validate_output_directory(config)?;
    validate_markdown(config)?;
    validate_collections(config)?;
    validate_passthrough(config);
    validate_sass(config);

    Ok(())
}

fn validate_input_directory(config: &Config) -> BoxResult<()> {
    let input = config.input_dir();

    if !input.exists() {
        return Err(SiteError::Config(format!(
            "Input directory does not exist: {}", input.display()
        )).into());
    }

    if !fs::is_directory(&input) {
        return Err(SiteError::Config(format!(
            "Input path is not a directory: {}", input.display()
        )).into());
    }

    info!("Input directory: {}", input.display());
    Ok(())
}

fn validate_output_directory(config: &Config) -> BoxResult<()> {
    let output = config.output_dir();

    if output.exists() && !output.is_dir() {
        return Err(SiteError::Config(format!(
            "Output path exists but is not a directory: {}", output.display()
        )).into());
    }

    if output == config.input_dir() {
        return Err(SiteError::Config(format!(
            "Output directory must differ from the input directory: {}", output.display()
        )).into());
    }

    info!("Output directory: {}", output.display());
    Ok(())
}

fn validate_markdown(config: &Config) -> BoxResult<()> {
    if let Some(level) = config.markdown.anchor.levels.iter().find(|l| !(1..=6).contains(*l)) {
        return Err(SiteError::Config(format!(
            "Heading anchor level out of range (1-6): {}", level
        )).into());
    }

    Ok(())
}

fn validate_collections(config: &Config) -> BoxResult<()> {
    for (name, collection) in &config.collections {
        if collection.glob.trim().is_empty() {
            return Err(SiteError::Config(format!(
                "Collection '{}' has an empty glob", name
            )).into());
        }

        if let Err(e) = glob::Pattern::new(&collection.glob) {
            return Err(SiteError::Config(format!(
                "Collection '{}' has an invalid glob '{}': {}", name, collection.glob, e
            )).into());
        }
    }

    Ok(())
}

/// Missing passthrough entries are not fatal: a fresh site may not have them yet
fn validate_passthrough(config: &Config) {
    let input = config.input_dir();

    for entry in &config.passthrough {
        if !input.join(entry).exists() {
            warn!("Passthrough entry does not exist: {}", input.join(entry).display());
        }
    }
}

fn validate_sass(config: &Config) {
    if let Some((sass_input, _)) = config.sass_paths() {
        if !sass_input.is_file() {
            warn!("Sass entry file does not exist: {}", sass_input.display());
        }
    }
}
