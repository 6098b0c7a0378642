mod compiler;
mod watcher;

pub use compiler::compile_stylesheet;
pub use watcher::watch_stylesheet;
