use lazy_static::lazy_static;
use regex::{Captures, Regex};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::utils::error::{BoxResult, SiteError};

lazy_static! {
    static ref CODE_BLOCK_REGEX: Regex = Regex::new(
        r#"<pre><code(?: class="language-([^"]+)")?>([^<]*)</code></pre>"#
    ).unwrap();
}

/// Class-based syntax highlighting for rendered code blocks.
///
/// Emits `<span class="...">` tokens so the site stylesheet controls colours.
pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        SyntaxHighlighter {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Highlight every fenced code block in rendered HTML
    pub fn highlight_html(&self, html: &str) -> BoxResult<String> {
        let mut failure = None;

        let highlighted = CODE_BLOCK_REGEX.replace_all(html, |caps: &Captures| {
            let code = html_escape::decode_html_entities(&caps[2]).to_string();
            let lang = caps.get(1).map(|m| m.as_str()).unwrap_or("text");

            match self.highlight_code(&code, lang) {
                Ok(block) => block,
                Err(e) => {
                    failure.get_or_insert(e);
                    caps[0].to_string()
                }
            }
        });

        match failure {
            Some(e) => Err(e),
            None => Ok(highlighted.into_owned()),
        }
    }

    /// Highlight a single block of code
    pub fn highlight_code(&self, code: &str, lang: &str) -> BoxResult<String> {
        let syntax = self.syntax_set.find_syntax_by_token(lang)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut html_generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::Spaced,
        );

        for line in LinesWithEndings::from(code) {
            html_generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|e| SiteError::Markdown(format!("Failed to highlight {} code: {}", lang, e)))?;
        }

        Ok(format!(
            "<pre class=\"language-{}\"><code class=\"language-{}\">{}</code></pre>",
            lang, lang, html_generator.finalize()
        ))
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        SyntaxHighlighter::new()
    }
}
