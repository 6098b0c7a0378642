use std::sync::Arc;

use crate::config::MarkdownConfig;
use crate::markdown::anchor::HeadingAnchors;
use crate::markdown::engine::{create_comrak_options, render_markdown};
use crate::markdown::renderer::SyntaxHighlighter;

/// Markdown renderer: comrak, then heading anchors, then code highlighting
#[derive(Clone)]
pub struct MarkdownRenderer {
    config: MarkdownConfig,
    anchors: HeadingAnchors,
    syntax_highlighter: Option<Arc<SyntaxHighlighter>>,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer from config
    pub fn new(config: &MarkdownConfig) -> Self {
        let syntax_highlighter = if config.highlight {
            Some(Arc::new(SyntaxHighlighter::new()))
        } else {
            None
        };

        MarkdownRenderer {
            config: config.clone(),
            anchors: HeadingAnchors::new(config.anchor.clone()),
            syntax_highlighter,
        }
    }

    /// Render Markdown content to HTML with all enabled features
    pub fn render(&self, content: &str) -> String {
        let options = create_comrak_options(&self.config);
        let html = render_markdown(content, &options);
        let html = self.anchors.apply(&html);

        match &self.syntax_highlighter {
            Some(highlighter) => match highlighter.highlight_html(&html) {
                Ok(highlighted) => highlighted,
                Err(e) => {
                    // If highlighting fails, just return the unhighlighted HTML
                    log::warn!("Syntax highlighting failed: {}", e);
                    html
                }
            },
            None => html,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_rendering() {
        let renderer = MarkdownRenderer::new(&MarkdownConfig::default());

        let markdown = "# Hello, World!\n\nThis is a **bold** statement.";
        let html = renderer.render(markdown);

        assert!(html.contains("<h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_heading_anchors() {
        let renderer = MarkdownRenderer::new(&MarkdownConfig::default());
        let html = renderer.render("## Getting Started\n\ntext\n");

        assert!(html.contains("<h2 id=\"getting-started\">Getting Started <a class=\"anchor-link\" href=\"#getting-started\""));
        assert!(html.contains("<i class=\"is-sr-only\">permalink</i>"));
    }

    #[test]
    fn test_syntax_highlighting() {
        let renderer = MarkdownRenderer::new(&MarkdownConfig::default());

        let markdown = "```rust\nfn main() {\n    println!(\"Hello, World!\");\n}\n```";
        let html = renderer.render(markdown);

        assert!(html.contains("<pre class=\"language-rust\">"));
        assert!(html.contains("<span class=\""));
    }

    #[test]
    fn test_highlighting_disabled() {
        let config = MarkdownConfig { highlight: false, ..MarkdownConfig::default() };
        let renderer = MarkdownRenderer::new(&config);
        let html = renderer.render("```rust\nlet x = 1;\n```");

        assert!(html.contains("<pre><code class=\"language-rust\">let x = 1;\n</code></pre>"));
    }
}
