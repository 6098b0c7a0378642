use log::info;

use crate::builder;
use crate::config::Config;
use crate::utils::error::BoxResult;

/// Handle the build command
pub fn handle_build_command(config: &Config, watch: bool) -> BoxResult<()> {
    if watch {
        return builder::watch_site(config);
    }

    let stats = builder::build_site(config)?;
    info!(
        "Site built successfully at {} ({} pages, {} not written, {} files copied)",
        config.output_dir().display(),
        stats.pages_written,
        stats.pages_skipped,
        stats.files_copied
    );
    if stats.stylesheet_compiled {
        info!("Stylesheet compiled");
    }

    Ok(())
}
