pub mod page;
pub mod passthrough;
pub mod site;
pub mod watcher;

pub use passthrough::copy_passthrough;
pub use site::{build_site, clean_site};
pub use watcher::watch_site;
