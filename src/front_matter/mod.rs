mod extractor;
mod types;

pub use extractor::extract_front_matter;
pub use types::{FrontMatter, Permalink};
