use std::fs;
use std::path::Path;

use liquid::model::Value;
use liquid::Object;
use log::{debug, info};

use crate::liquid::convert::{json_to_liquid, toml_to_liquid, yaml_to_liquid};
use crate::utils::error::{BoxResult, SiteError};

/// Load the global data files of `data_dir`, keyed by file stem.
/// Subdirectories become nested objects.
pub fn load_data_files(data_dir: &Path) -> BoxResult<Object> {
    let mut data = Object::new();

    if !data_dir.is_dir() {
        debug!("No data directory at {}", data_dir.display());
        return Ok(data);
    }

    info!("Loading data files...");
    process_data_directory(data_dir, &mut data)?;
    debug!("Loaded {} data entries", data.len());

    Ok(data)
}

fn process_data_directory(dir: &Path, data: &mut Object) -> BoxResult<()> {
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }

        if path.is_dir() {
            let mut subdir_data = Object::new();
            process_data_directory(&path, &mut subdir_data)?;
            data.insert(name.into(), Value::Object(subdir_data));
            continue;
        }

        let stem = match path.file_stem() {
            Some(stem) => stem.to_string_lossy().to_string(),
            None => continue,
        };
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let value = match extension.as_str() {
            "yml" | "yaml" => {
                let content = fs::read_to_string(&path)?;
                let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
                    .map_err(|e| data_error(&path, e))?;
                yaml_to_liquid(yaml)
            }
            "json" => {
                let content = fs::read_to_string(&path)?;
                let json: serde_json::Value = serde_json::from_str(&content)
                    .map_err(|e| data_error(&path, e))?;
                json_to_liquid(json)
            }
            "toml" => {
                let content = fs::read_to_string(&path)?;
                let value: toml::Value = toml::from_str(&content)
                    .map_err(|e| data_error(&path, e))?;
                toml_to_liquid(value)
            }
            _ => {
                debug!("Skipping data file with unknown format: {}", path.display());
                continue;
            }
        };

        data.insert(stem.into(), value);
    }

    Ok(())
}

fn data_error(path: &Path, err: impl std::fmt::Display) -> SiteError {
    SiteError::Generic(format!("Failed to parse data file {}: {}", path.display(), err))
}
