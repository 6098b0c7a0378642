use std::collections::BTreeMap;

use glob::{MatchOptions, Pattern};
use liquid::model::Value;
use liquid::Object;

use crate::builder::page::Page;
use crate::collections::add_file_dates;
use crate::config::Config;
use crate::utils::error::{BoxResult, SiteError};

/// Name of the collection holding every written page
pub const ALL_COLLECTION: &str = "all";

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Named, ordered groups of pages. Items are indices into the page list the
/// collections were built from.
#[derive(Debug, Default, Clone)]
pub struct Collections {
    entries: BTreeMap<String, Vec<usize>>,
}

impl Collections {
    /// Build the configured collections, `all` and one collection per tag.
    /// Pages of a collection with `file_dates` get their file dates first.
    pub fn build(pages: &mut [Page], config: &Config) -> BoxResult<Self> {
        let mut entries: BTreeMap<String, Vec<usize>> = BTreeMap::new();

        for (name, collection) in &config.collections {
            let pattern = Pattern::new(&collection.glob).map_err(|e| {
                SiteError::Config(format!("Invalid glob for collection '{}': {}", name, e))
            })?;

            let members: Vec<usize> = pages
                .iter()
                .enumerate()
                .filter(|(_, page)| pattern.matches_path_with(&page.relative_path, GLOB_OPTIONS))
                .map(|(idx, _)| idx)
                .collect();

            if collection.file_dates {
                for &idx in &members {
                    add_file_dates(&mut pages[idx]);
                }
            }

            entries.insert(name.clone(), members);
        }

        let written: Vec<usize> = pages
            .iter()
            .enumerate()
            .filter(|(_, page)| page.output_path.is_some())
            .map(|(idx, _)| idx)
            .collect();
        entries.insert(ALL_COLLECTION.to_string(), written);

        // Tag collections follow `all`: only pages that are written
        for (idx, page) in pages.iter().enumerate() {
            if page.output_path.is_none() {
                continue;
            }

            for tag in page.front_matter.tags() {
                let members = entries.entry(tag).or_default();
                if !members.contains(&idx) {
                    members.push(idx);
                }
            }
        }

        for members in entries.values_mut() {
            members.sort_by(|&a, &b| {
                let (a, b) = (&pages[a], &pages[b]);
                a.effective_date()
                    .cmp(&b.effective_date())
                    .then_with(|| a.relative_path.cmp(&b.relative_path))
            });
        }

        Ok(Collections { entries })
    }

    pub fn get(&self, name: &str) -> Option<&[usize]> {
        self.entries.get(name).map(|members| members.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|name| name.as_str())
    }

    /// The `collections` global
    pub fn to_liquid(&self, pages: &[Page]) -> Object {
        let mut obj = Object::new();

        for (name, members) in &self.entries {
            let items: Vec<Value> = members
                .iter()
                .map(|&idx| pages[idx].to_collection_item())
                .collect();
            obj.insert(name.clone().into(), Value::Array(items));
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::page::collect_pages;
    use liquid::ValueView;
    use std::fs;

    fn site(files: &[(&str, &str)]) -> (tempfile::TempDir, Config, Vec<Page>) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_root(dir.path());
        let src = config.input_dir();

        for (relative, contents) in files {
            let path = src.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, contents).unwrap();
        }

        let pages = collect_pages(&config).unwrap();
        (dir, config, pages)
    }

    fn relative(pages: &[Page], members: &[usize]) -> Vec<String> {
        members
            .iter()
            .map(|&idx| pages[idx].relative_path.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_posts_sorted_by_date() {
        let (_dir, config, mut pages) = site(&[
            ("index.md", "Home"),
            ("_posts/b.md", "---\ndate: 2021-01-02\n---\nB"),
            ("_posts/a.md", "---\ndate: 2021-05-01\n---\nA"),
            ("_posts/2020/old.md", "---\ndate: 2020-06-01\n---\nOld"),
        ]);

        let collections = Collections::build(&mut pages, &config).unwrap();
        let posts = collections.get("posts").unwrap();

        assert_eq!(
            relative(&pages, posts),
            vec!["_posts/2020/old.md", "_posts/b.md", "_posts/a.md"]
        );
        for &idx in posts {
            assert!(pages[idx].date_modified.is_some());
        }
        // Not a post, no file dates
        let index = pages.iter().find(|p| p.relative_path.ends_with("index.md")).unwrap();
        assert!(index.date_modified.is_none());
    }

    #[test]
    fn test_undated_posts_sorted_by_path() {
        let (_dir, mut config, mut pages) = site(&[("_posts/z.md", "Z"), ("_posts/m.md", "M")]);
        config.collections.get_mut("posts").unwrap().file_dates = false;

        let collections = Collections::build(&mut pages, &config).unwrap();
        assert_eq!(
            relative(&pages, collections.get("posts").unwrap()),
            vec!["_posts/m.md", "_posts/z.md"]
        );
    }

    #[test]
    fn test_all_and_tag_collections() {
        let (_dir, config, mut pages) = site(&[
            ("index.md", "---\ntags: home\n---\nHome"),
            ("hidden.md", "---\npermalink: false\ntags: [rust]\n---\nDraft"),
            ("_posts/a.md", "---\ntags: [rust, web]\n---\nA"),
        ]);

        let collections = Collections::build(&mut pages, &config).unwrap();

        assert_eq!(collections.get(ALL_COLLECTION).unwrap().len(), 2);
        assert_eq!(relative(&pages, collections.get("rust").unwrap()), vec!["_posts/a.md"]);
        assert_eq!(relative(&pages, collections.get("web").unwrap()), vec!["_posts/a.md"]);
        assert_eq!(relative(&pages, collections.get("home").unwrap()), vec!["index.md"]);
        assert!(collections.names().any(|name| name == "posts"));
    }

    #[test]
    fn test_unwritten_pages_are_in_no_tag_collection() {
        let (_dir, config, mut pages) = site(&[
            ("draft.md", "---\npermalink: false\ntags: [drafts]\n---\nDraft"),
            ("note.md", "---\npermalink: false\ntags: notes\n---\nNote"),
            ("index.md", "---\ntags: notes\n---\nHome"),
        ]);

        let collections = Collections::build(&mut pages, &config).unwrap();

        assert!(collections.get("drafts").is_none());
        assert_eq!(relative(&pages, collections.get("notes").unwrap()), vec!["index.md"]);
        assert_eq!(relative(&pages, collections.get(ALL_COLLECTION).unwrap()), vec!["index.md"]);
    }

    #[test]
    fn test_to_liquid() {
        let (_dir, config, mut pages) = site(&[("_posts/a.md", "---\ntitle: A\n---\nA")]);
        let collections = Collections::build(&mut pages, &config).unwrap();
        let obj = collections.to_liquid(&pages);

        match obj.get("posts") {
            Some(Value::Array(posts)) => {
                assert_eq!(posts.len(), 1);
                match &posts[0] {
                    Value::Object(item) => {
                        assert_eq!(item.get("url").unwrap().to_kstr().to_string(), "/_posts/a/")
                    }
                    other => panic!("expected an object, got {:?}", other),
                }
            }
            other => panic!("expected posts array, got {:?}", other),
        }
    }
}
