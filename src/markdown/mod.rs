pub mod anchor;
pub mod engine;
pub mod renderer;

pub use renderer::MarkdownRenderer;
