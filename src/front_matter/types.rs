use liquid::model::Value as LiquidValue;
use liquid::Object;
use serde_yaml::{Mapping, Value};

use crate::liquid::convert::yaml_to_liquid;

/// Where a template asks to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Permalink {
    /// Derive the output path from the input path
    Default,
    /// `permalink: false`: render but do not write
    Disabled,
    /// Explicit output path relative to the output dir
    Path(String),
}

/// Front matter of a template or layout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    data: Mapping,
}

impl FrontMatter {
    /// Parse a YAML front matter block; an empty block is an empty mapping
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(FrontMatter::default());
        }

        let data: Mapping = serde_yaml::from_str(yaml)?;
        Ok(FrontMatter { data })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    pub fn layout(&self) -> Option<&str> {
        self.get_str("layout").filter(|l| !l.trim().is_empty())
    }

    /// The `date` value as written, if it is a string
    pub fn date(&self) -> Option<&str> {
        self.get_str("date")
    }

    pub fn permalink(&self) -> Permalink {
        match self.get("permalink") {
            Some(Value::Bool(false)) => Permalink::Disabled,
            Some(Value::String(path)) if !path.trim().is_empty() => Permalink::Path(path.clone()),
            _ => Permalink::Default,
        }
    }

    /// `tags` as a list, accepting a single string too
    pub fn tags(&self) -> Vec<String> {
        match self.get("tags") {
            Some(Value::String(tag)) => vec![tag.clone()],
            Some(Value::Sequence(tags)) => tags
                .iter()
                .filter_map(|t| t.as_str().map(|s| s.to_string()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Layout front matter is inherited by the page: page keys win
    pub fn merged_under(&self, page: &FrontMatter) -> FrontMatter {
        let mut data = self.data.clone();
        for (key, value) in &page.data {
            data.insert(key.clone(), value.clone());
        }
        FrontMatter { data }
    }

    pub fn to_liquid(&self) -> Object {
        match yaml_to_liquid(Value::Mapping(self.data.clone())) {
            LiquidValue::Object(obj) => obj,
            _ => Object::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permalink_variants() {
        assert_eq!(FrontMatter::from_yaml("title: x").unwrap().permalink(), Permalink::Default);
        assert_eq!(FrontMatter::from_yaml("permalink: false").unwrap().permalink(), Permalink::Disabled);
        assert_eq!(
            FrontMatter::from_yaml("permalink: /feed.xml").unwrap().permalink(),
            Permalink::Path("/feed.xml".to_string())
        );
    }

    #[test]
    fn test_tags_string_or_list() {
        assert_eq!(FrontMatter::from_yaml("tags: rust").unwrap().tags(), vec!["rust"]);
        assert_eq!(
            FrontMatter::from_yaml("tags: [rust, web]").unwrap().tags(),
            vec!["rust", "web"]
        );
        assert!(FrontMatter::default().tags().is_empty());
    }

    #[test]
    fn test_unquoted_date_is_string() {
        let fm = FrontMatter::from_yaml("date: 2021-03-07").unwrap();
        assert_eq!(fm.date(), Some("2021-03-07"));
    }

    #[test]
    fn test_merge_page_over_layout() {
        let layout = FrontMatter::from_yaml("layout: base\ntitle: Layout\nauthor: me").unwrap();
        let page = FrontMatter::from_yaml("title: Page").unwrap();
        let merged = layout.merged_under(&page);

        assert_eq!(merged.title(), Some("Page"));
        assert_eq!(merged.get_str("author"), Some("me"));
    }

    #[test]
    fn test_non_mapping_is_error() {
        assert!(FrontMatter::from_yaml("- a\n- b").is_err());
    }
}
