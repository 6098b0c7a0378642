mod build;
mod clean;
mod styles;

pub use build::handle_build_command;
pub use clean::handle_clean_command;
pub use styles::handle_styles_command;
