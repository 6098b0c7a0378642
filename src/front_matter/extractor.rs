use crate::front_matter::types::FrontMatter;
use crate::utils::error::{BoxResult, SiteError};

const DELIMITER: &str = "---";

/// Split a template into its YAML front matter and body.
///
/// Front matter must open on the first line with `---` and close with a line
/// that is exactly `---`. Content without front matter yields an empty
/// `FrontMatter` and the content unchanged.
pub fn extract_front_matter(content: &str) -> BoxResult<(FrontMatter, String)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let first_line_end = match content.find('\n') {
        Some(pos) => pos,
        None => return Ok((FrontMatter::default(), content.to_string())),
    };

    if content[..first_line_end].trim_end() != DELIMITER {
        return Ok((FrontMatter::default(), content.to_string()));
    }

    let rest = &content[first_line_end + 1..];
    let mut offset = 0;

    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];

            let front_matter = FrontMatter::from_yaml(yaml).map_err(|e| {
                SiteError::FrontMatter(format!("Error parsing front matter: {}", e))
            })?;

            return Ok((front_matter, body.to_string()));
        }
        offset += line.len();
    }

    Err(SiteError::FrontMatter("Malformed front matter: missing closing delimiter".to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_front_matter() {
        let (fm, body) = extract_front_matter("# Title\n\nText").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "# Title\n\nText");
    }

    #[test]
    fn test_front_matter_and_body() {
        let content = "---\ntitle: Hello\nlayout: post\n---\n# Body\n";
        let (fm, body) = extract_front_matter(content).unwrap();

        assert_eq!(fm.title(), Some("Hello"));
        assert_eq!(fm.layout(), Some("post"));
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn test_horizontal_rule_in_body_is_kept() {
        let content = "---\ntitle: x\n---\nabove\n\n---\n\nbelow\n";
        let (_, body) = extract_front_matter(content).unwrap();
        assert_eq!(body, "above\n\n---\n\nbelow\n");
    }

    #[test]
    fn test_empty_front_matter() {
        let (fm, body) = extract_front_matter("---\n---\nbody").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_unclosed_front_matter() {
        let err = extract_front_matter("---\ntitle: x\nbody").unwrap_err();
        assert!(err.to_string().contains("missing closing delimiter"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = extract_front_matter("---\ntitle: [x\n---\nbody").unwrap_err();
        assert!(err.to_string().starts_with("Front matter error"));
    }
}
