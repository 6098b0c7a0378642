use log::info;

use crate::config::Config;
use crate::styles;
use crate::utils::error::{BoxResult, SiteError};

/// Handle the styles command
pub fn handle_styles_command(config: &Config, watch: bool) -> BoxResult<()> {
    let (input, output) = config.sass_paths().ok_or_else(|| {
        SiteError::Config("No stylesheet configured (missing `sass` section)".to_string())
    })?;

    if watch {
        styles::watch_stylesheet(&input, &output, config.sass_style())
    } else {
        let stats = styles::compile_stylesheet(&input, &output, config.sass_style())?;
        info!("Stylesheet compiled to {} ({} bytes)", stats.output.display(), stats.bytes);
        Ok(())
    }
}
