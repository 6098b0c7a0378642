use std::fs;

use chrono::{DateTime, Utc};
use log::debug;

use crate::builder::page::Page;

/// Decorate a page with its file creation and modification times.
///
/// Birth time is not reported on every platform; a stat failure leaves both
/// dates unset.
pub fn add_file_dates(page: &mut Page) {
    let metadata = match fs::metadata(&page.path) {
        Ok(metadata) => metadata,
        Err(e) => {
            debug!("No file dates for {}: {}", page.path.display(), e);
            return;
        }
    };

    page.date_created = metadata.created().ok().map(DateTime::<Utc>::from);
    page.date_modified = metadata.modified().ok().map(DateTime::<Utc>::from);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::page::collect_pages;
    use crate::config::Config;
    use std::path::Path;

    fn post(root: &Path) -> Page {
        let config = Config::with_root(root);
        fs::create_dir_all(config.input_dir()).unwrap();
        fs::write(config.input_dir().join("post.md"), "hello").unwrap();
        collect_pages(&config).unwrap().remove(0)
    }

    #[test]
    fn test_dates_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut page = post(dir.path());
        add_file_dates(&mut page);

        let modified = page.date_modified.unwrap();
        assert!(modified <= Utc::now());
    }

    #[test]
    fn test_missing_file_leaves_dates_unset() {
        let dir = tempfile::tempdir().unwrap();
        let mut page = post(dir.path());
        fs::remove_file(&page.path).unwrap();
        add_file_dates(&mut page);

        assert!(page.date_created.is_none());
        assert!(page.date_modified.is_none());
    }
}
