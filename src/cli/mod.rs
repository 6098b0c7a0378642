pub mod commands;
pub mod logging;
pub mod types;

use std::path::PathBuf;

use clap::Parser;

use crate::config;
use crate::utils::error::BoxResult;

/// Run the command-line interface
pub fn run() -> BoxResult<()> {
    let cli = types::Cli::parse();

    logging::init_logging(cli.debug);
    logging::configure_backtrace(cli.trace);

    let root = cli.source.clone().unwrap_or_else(|| PathBuf::from("."));
    let config = config::load_config(&root, cli.config.clone())?;

    match cli.command.unwrap_or(types::Commands::Build { watch: false }) {
        types::Commands::Build { watch } => commands::handle_build_command(&config, watch),
        types::Commands::Styles { watch } => commands::handle_styles_command(&config, watch),
        types::Commands::Clean => commands::handle_clean_command(&config),
    }
}
