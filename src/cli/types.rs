use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI parser structure
#[derive(Parser, Debug)]
#[command(name = "sitewright")]
#[command(about = "Blog builder with Liquid templates, Markdown and Sass", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Project root holding the config file and the input directory (defaults to ./)
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Custom configuration file
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Show the full backtrace when an error occurs
    #[arg(short, long, default_value_t = false)]
    pub trace: bool,

    /// Enable verbose debugging
    #[arg(short = 'g', long, default_value_t = false)]
    pub debug: bool,
}

/// Subcommands for the CLI
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Build your site
    #[command(alias = "b")]
    Build {
        /// Watch for changes and rebuild
        #[arg(short = 'w', long, default_value_t = false)]
        watch: bool,
    },

    /// Compile the Sass stylesheet only
    #[command(alias = "s")]
    Styles {
        /// Watch the stylesheet directory and recompile
        #[arg(short = 'w', long, default_value_t = false)]
        watch: bool,
    },

    /// Remove the output directory
    Clean,
}
