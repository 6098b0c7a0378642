mod collector;
mod model;
mod utils;

pub use collector::collect_pages;
pub use model::Page;
pub use utils::{determine_output_path, is_contained, url_for_output};
