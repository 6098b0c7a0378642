mod builder;
mod loader;
mod processor;

pub use builder::{build_site, clean_site};
pub use loader::{load_includes, load_layouts, LayoutInfo};
pub use processor::{process_pages, RenderContext};
