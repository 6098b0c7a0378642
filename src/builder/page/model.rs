use std::path::PathBuf;

use chrono::{DateTime, Utc};
use liquid::model::Value;
use liquid::Object;

use crate::front_matter::FrontMatter;
use crate::utils::date::to_template_string;

/// A template file in the input directory
#[derive(Debug, Clone)]
pub struct Page {
    /// Absolute input path
    pub path: PathBuf,
    /// Input path relative to the input dir
    pub relative_path: PathBuf,
    /// Output path relative to the output dir, `None` when not written
    pub output_path: Option<PathBuf>,
    pub url: Option<String>,
    /// Front matter `date`
    pub date: Option<DateTime<Utc>>,
    /// File birth time, set by a collection with file dates
    pub date_created: Option<DateTime<Utc>>,
    /// File modification time, set by a collection with file dates
    pub date_modified: Option<DateTime<Utc>>,
    pub front_matter: FrontMatter,
    /// Template body without front matter
    pub content: String,
}

impl Page {
    /// Front matter date, falling back to the file dates
    pub fn effective_date(&self) -> Option<DateTime<Utc>> {
        self.date.or(self.date_created).or(self.date_modified)
    }

    pub fn file_slug(&self) -> String {
        let stem = self
            .relative_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        if stem == "index" {
            self.relative_path
                .parent()
                .and_then(|p| p.file_name())
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default()
        } else {
            stem
        }
    }

    pub fn is_markdown(&self) -> bool {
        self.relative_path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
            .unwrap_or(false)
    }

    /// The `page` object templates see
    pub fn to_liquid(&self) -> Object {
        let mut obj = Object::new();

        obj.insert("input_path".into(), Value::scalar(self.relative_path.to_string_lossy().to_string()));
        obj.insert("file_slug".into(), Value::scalar(self.file_slug()));

        if let Some(output_path) = &self.output_path {
            obj.insert("output_path".into(), Value::scalar(output_path.to_string_lossy().to_string()));
        }

        if let Some(url) = &self.url {
            obj.insert("url".into(), Value::scalar(url.clone()));
        }

        let dates = [
            ("date", self.effective_date()),
            ("date_created", self.date_created),
            ("date_modified", self.date_modified),
        ];
        for (key, date) in dates {
            if let Some(date) = date {
                obj.insert(key.into(), Value::scalar(to_template_string(&date)));
            }
        }

        obj
    }

    /// A collection item: the page object plus its front matter under `data`
    pub fn to_collection_item(&self) -> Value {
        let mut obj = self.to_liquid();
        let data = self.front_matter.to_liquid();

        if let Some(title) = self.front_matter.title() {
            obj.insert("title".into(), Value::scalar(title.to_string()));
        }
        obj.insert("data".into(), Value::Object(data));

        Value::Object(obj)
    }
}
