use comrak::Options;

use crate::config::MarkdownConfig;

/// Create comrak options from the markdown configuration.
///
/// GitHub Flavored Markdown extensions are always on; `html`, `linkify` and
/// `typographer` map to raw HTML passthrough, autolinks and smart punctuation.
pub fn create_comrak_options<'a>(config: &MarkdownConfig) -> Options<'a> {
    let mut options = Options::default();

    options.extension.strikethrough = true;
    options.extension.tagfilter = !config.html;
    options.extension.table = true;
    options.extension.autolink = config.linkify;
    options.extension.tasklist = true;
    options.extension.footnotes = true;

    options.render.hardbreaks = false;
    options.render.github_pre_lang = false;
    options.render.unsafe_ = config.html;

    options.parse.smart = config.typographer;

    options
}

/// Render markdown to HTML using Comrak
pub fn render_markdown<'a>(content: &str, options: &Options<'a>) -> String {
    comrak::markdown_to_html(content, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comrak_rendering() {
        let options = create_comrak_options(&MarkdownConfig::default());
        let markdown = "# Hello, World!\n\nThis is a **bold** statement.";
        let html = render_markdown(markdown, &options);

        assert!(html.contains("<h1>"));
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_raw_html_and_linkify() {
        let options = create_comrak_options(&MarkdownConfig::default());
        let html = render_markdown("<div class=\"note\">hi</div>\n\nsee https://example.com\n", &options);

        assert!(html.contains("<div class=\"note\">hi</div>"));
        assert!(html.contains("<a href=\"https://example.com\">"));
    }

    #[test]
    fn test_raw_html_disabled() {
        let config = MarkdownConfig { html: false, ..MarkdownConfig::default() };
        let options = create_comrak_options(&config);
        let html = render_markdown("<div>hi</div>\n", &options);

        assert!(!html.contains("<div>hi</div>"));
    }

    #[test]
    fn test_typographer() {
        let options = create_comrak_options(&MarkdownConfig::default());
        let html = render_markdown("\"quoted\" -- dash\n", &options);

        assert!(html.contains('\u{201c}'));
        assert!(html.contains('\u{2013}'));
    }
}
