use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::config::AnchorConfig;

lazy_static! {
    // The regex crate has no backreferences, so the closing level is not checked.
    static ref HEADING_REGEX: Regex = Regex::new(
        r#"(?s)<h([1-6])((?:\s[^>]*)?)>(.*?)</h[1-6]>"#
    ).unwrap();

    static ref ID_ATTR_REGEX: Regex = Regex::new(r#"\sid="([^"]*)""#).unwrap();

    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Adds ids and permalink anchors to rendered headings.
#[derive(Debug, Clone)]
pub struct HeadingAnchors {
    config: AnchorConfig,
}

impl HeadingAnchors {
    pub fn new(config: AnchorConfig) -> Self {
        HeadingAnchors { config }
    }

    /// Process every heading of a rendered document. Slugs are unique within
    /// one call; a heading that already has an id keeps it.
    pub fn apply(&self, html: &str) -> String {
        if !self.config.enabled {
            return html.to_string();
        }

        let mut seen: HashMap<String, usize> = HashMap::new();

        HEADING_REGEX
            .replace_all(html, |caps: &Captures| self.process_heading(caps, &mut seen))
            .into_owned()
    }

    fn process_heading(&self, caps: &Captures, seen: &mut HashMap<String, usize>) -> String {
        let level: u8 = caps[1].parse().unwrap_or(0);
        if !self.config.levels.contains(&level) {
            return caps[0].to_string();
        }

        let attrs = &caps[2];
        let inner = &caps[3];

        let (id, id_attr) = match ID_ATTR_REGEX.captures(attrs) {
            Some(existing) => {
                let id = existing[1].to_string();
                seen.entry(id.clone()).or_insert(0);
                (id, String::new())
            }
            None => {
                let id = unique_slug(&heading_slug(inner), seen);
                let id_attr = format!(" id=\"{}\"", id);
                (id, id_attr)
            }
        };

        let permalink = if self.config.permalink {
            format!(
                " <a class=\"{}\" href=\"#{}\" aria-hidden=\"true\">{}</a>",
                self.config.permalink_class, id, self.config.permalink_symbol
            )
        } else {
            String::new()
        };

        format!("<h{level}{id_attr}{attrs}>{inner}{permalink}</h{level}>")
    }
}

/// Slug for the visible text of a heading
fn heading_slug(inner_html: &str) -> String {
    let text = TAG_REGEX.replace_all(inner_html, "");
    let text = html_escape::decode_html_entities(&text);
    let slug = slug::slugify(text.trim());

    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

/// First use keeps the slug, later uses get `-1`, `-2`, ...
fn unique_slug(slug: &str, seen: &mut HashMap<String, usize>) -> String {
    let mut count = match seen.get(slug) {
        None => {
            seen.insert(slug.to_string(), 0);
            return slug.to_string();
        }
        Some(count) => *count,
    };

    loop {
        count += 1;
        let candidate = format!("{}-{}", slug, count);
        if !seen.contains_key(&candidate) {
            seen.insert(slug.to_string(), count);
            seen.insert(candidate.clone(), 0);
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchors() -> HeadingAnchors {
        HeadingAnchors::new(AnchorConfig {
            permalink_symbol: "#".to_string(),
            ..AnchorConfig::default()
        })
    }

    #[test]
    fn test_heading_gets_id_and_permalink() {
        let out = anchors().apply("<h2>Hello World</h2>");
        assert_eq!(
            out,
            "<h2 id=\"hello-world\">Hello World <a class=\"anchor-link\" href=\"#hello-world\" aria-hidden=\"true\">#</a></h2>"
        );
    }

    #[test]
    fn test_levels_outside_config_untouched() {
        let html = "<h1>Title</h1><h5>Deep</h5>";
        assert_eq!(anchors().apply(html), html);
    }

    #[test]
    fn test_duplicate_headings() {
        let out = anchors().apply("<h2>Notes</h2><h3>Notes</h3><h2>Notes</h2>");

        assert!(out.contains("id=\"notes\""));
        assert!(out.contains("id=\"notes-1\""));
        assert!(out.contains("id=\"notes-2\""));
    }

    #[test]
    fn test_existing_id_kept() {
        let out = anchors().apply("<h2 id=\"custom\" class=\"x\">Hi</h2>");
        assert_eq!(
            out,
            "<h2 id=\"custom\" class=\"x\">Hi <a class=\"anchor-link\" href=\"#custom\" aria-hidden=\"true\">#</a></h2>"
        );
    }

    #[test]
    fn test_inline_markup_stripped_from_slug() {
        let out = anchors().apply("<h3>Using <code>fs.watch</code> &amp; more</h3>");
        assert!(out.starts_with("<h3 id=\"using-fs-watch-more\">"));
    }

    #[test]
    fn test_permalink_disabled() {
        let anchors = HeadingAnchors::new(AnchorConfig {
            permalink: false,
            ..AnchorConfig::default()
        });
        assert_eq!(anchors.apply("<h2>A</h2>"), "<h2 id=\"a\">A</h2>");
    }

    #[test]
    fn test_disabled() {
        let anchors = HeadingAnchors::new(AnchorConfig {
            enabled: false,
            ..AnchorConfig::default()
        });
        assert_eq!(anchors.apply("<h2>A</h2>"), "<h2>A</h2>");
    }
}
