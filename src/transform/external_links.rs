use std::path::Path;

use lazy_static::lazy_static;
use log::trace;
use regex::{Captures, Regex};

use crate::config::ExternalLinkConfig;
use crate::transform::Transform;
use crate::utils::error::BoxResult;

lazy_static! {
    // Opening anchor tags whose href points at an http(s) URL. Tag-local: never crosses a '>'.
    static ref EXTERNAL_LINK_REGEX: Regex = Regex::new(
        r#"<a[\t\n\x0C\r ](?:[^>]*?[\t\n\x0C\r ])?href="https?://[^"]+"[^>]*>"#
    ).unwrap();

    static ref CLASS_ATTR_REGEX: Regex = Regex::new(r#"[\t\n\x0C\r ]class="([^"]*)""#).unwrap();
    static ref TARGET_ATTR_REGEX: Regex = Regex::new(r#"[\t\n\x0C\r ]target="[^"]*""#).unwrap();
    static ref REL_ATTR_REGEX: Regex = Regex::new(r#"[\t\n\x0C\r ]rel="[^"]*""#).unwrap();
}

/// Rewrites external anchor tags so they carry a marker class, a `target`
/// and a `rel` attribute.
///
/// Attributes already present on a tag are merged rather than replaced, and a
/// tag that already has both `target` and `rel` is left exactly as written.
/// Running the annotator over its own output changes nothing.
#[derive(Debug, Clone)]
pub struct LinkAnnotator {
    config: ExternalLinkConfig,
}

impl LinkAnnotator {
    pub fn new(config: ExternalLinkConfig) -> Self {
        LinkAnnotator { config }
    }

    /// Annotate every external anchor tag in `html`. Everything outside the
    /// matched opening tags is returned byte-for-byte.
    pub fn annotate(&self, html: &str) -> String {
        EXTERNAL_LINK_REGEX
            .replace_all(html, |caps: &Captures| self.annotate_tag(&caps[0]))
            .into_owned()
    }

    fn annotate_tag(&self, tag: &str) -> String {
        let has_target = TARGET_ATTR_REGEX.is_match(tag);
        let has_rel = REL_ATTR_REGEX.is_match(tag);

        // Both present: assume the author got it right.
        if has_target && has_rel {
            return tag.to_string();
        }

        let tag = self.merge_class(tag);

        let mut appended = Vec::with_capacity(2);
        if !has_target {
            appended.push(format!("target=\"{}\"", self.config.target));
        }
        if !has_rel {
            appended.push(format!("rel=\"{}\"", self.config.rel));
        }

        trace!("Annotating external link {}", tag);
        insert_before_close(&tag, &appended.join(" "))
    }

    fn merge_class(&self, tag: &str) -> String {
        let class_name = self.config.class_name.trim();
        if class_name.is_empty() {
            return tag.to_string();
        }

        match CLASS_ATTR_REGEX.captures(tag).and_then(|caps| caps.get(1)) {
            Some(existing) => {
                let value = existing.as_str();
                if value.split_whitespace().any(|token| token == class_name) {
                    return tag.to_string();
                }

                let merged = if value.trim().is_empty() {
                    class_name.to_string()
                } else {
                    format!("{} {}", value.trim_end(), class_name)
                };

                format!("{}{}{}", &tag[..existing.start()], merged, &tag[existing.end()..])
            }
            None => {
                // "<a" plus the single ASCII whitespace byte the match started with.
                let (open, rest) = tag.split_at(3);
                format!("{}class=\"{}\" {}", open, class_name, rest)
            }
        }
    }
}

impl Default for LinkAnnotator {
    fn default() -> Self {
        LinkAnnotator::new(ExternalLinkConfig::default())
    }
}

impl Transform for LinkAnnotator {
    fn name(&self) -> &str {
        "external-link-rel"
    }

    fn apply(&self, content: &str, _output_path: &Path) -> BoxResult<String> {
        Ok(self.annotate(content))
    }
}

/// Insert `attrs` just before the closing `>` (or `/>`) of `tag`, keeping any
/// whitespace the author left before the close.
fn insert_before_close(tag: &str, attrs: &str) -> String {
    if attrs.is_empty() {
        return tag.to_string();
    }

    let body = tag.strip_suffix('>').unwrap_or(tag);
    let (head, close) = match body.strip_suffix('/') {
        Some(head) => (head, "/>"),
        None => (body, ">"),
    };

    let trimmed = head.trim_end();
    let trailing = &head[trimmed.len()..];

    format!("{} {}{}{}", trimmed, attrs, trailing, close)
}
