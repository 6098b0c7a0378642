use log::info;

use crate::builder;
use crate::config::Config;
use crate::utils::error::BoxResult;

/// Handle the clean command
pub fn handle_clean_command(config: &Config) -> BoxResult<()> {
    builder::clean_site(config)?;
    info!("Site cleaned successfully");
    Ok(())
}
