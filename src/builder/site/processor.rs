use std::collections::HashMap;
use std::path::{Path, PathBuf};

use liquid::model::Value;
use liquid::{Object, Parser};
use log::{debug, error, info};
use rayon::prelude::*;

use crate::builder::page::Page;
use crate::builder::site::LayoutInfo;
use crate::front_matter::FrontMatter;
use crate::liquid::render_liquid;
use crate::markdown::MarkdownRenderer;
use crate::transform::TransformRegistry;
use crate::utils::error::{BoxResult, SiteError};
use crate::utils::fs::write_file;

/// Layouts nested deeper than this are treated as a cycle
const MAX_LAYOUT_DEPTH: usize = 16;

/// Everything a page needs to render, shared across worker threads
pub struct RenderContext<'a> {
    pub parser: &'a Parser,
    pub layouts: &'a HashMap<String, LayoutInfo>,
    pub markdown: &'a MarkdownRenderer,
    pub transforms: &'a TransformRegistry,
    /// Site-wide globals: `site`, `collections` and the data files
    pub globals: &'a Object,
    pub output_dir: &'a Path,
}

/// Outcome of rendering every page
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessStats {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Render and write pages in parallel. A failing page is logged and counted,
/// the other pages are still written. Two pages sharing an output path fail
/// before anything is written.
pub fn process_pages(pages: &[Page], ctx: &RenderContext) -> BoxResult<ProcessStats> {
    info!("Processing {} pages...", pages.len());
    check_duplicate_outputs(pages)?;

    let results: Vec<(&Page, BoxResult<Option<PathBuf>>)> = pages
        .par_iter()
        .map(|page| (page, write_page(page, ctx)))
        .collect();

    let mut stats = ProcessStats::default();
    for (page, result) in results {
        match result {
            Ok(Some(path)) => {
                debug!("Wrote {} -> {}", page.relative_path.display(), path.display());
                stats.written += 1;
            }
            Ok(None) => {
                debug!("Skipping page {} (no output path)", page.relative_path.display());
                stats.skipped += 1;
            }
            Err(e) => {
                error!("Error processing {}: {}", page.relative_path.display(), e);
                stats.failed += 1;
            }
        }
    }

    Ok(stats)
}

fn check_duplicate_outputs(pages: &[Page]) -> BoxResult<()> {
    let mut seen: HashMap<&Path, &Page> = HashMap::new();

    for page in pages {
        let Some(output) = page.output_path.as_deref() else {
            continue;
        };

        if let Some(first) = seen.insert(output, page) {
            return Err(SiteError::Template(format!(
                "Duplicate output path {}: written by both {} and {}",
                output.display(),
                first.relative_path.display(),
                page.relative_path.display()
            ))
            .into());
        }
    }

    Ok(())
}

fn write_page(page: &Page, ctx: &RenderContext) -> BoxResult<Option<PathBuf>> {
    let output_path = match &page.output_path {
        Some(relative) => ctx.output_dir.join(relative),
        None => return Ok(None),
    };

    let html = render_page(page, ctx)?;
    let html = ctx.transforms.apply(&html, &output_path)?;
    write_file(&output_path, &html)?;

    Ok(Some(output_path))
}

/// Render the page body through Liquid, then Markdown for `.md` files, then
/// its layout chain.
pub fn render_page(page: &Page, ctx: &RenderContext) -> BoxResult<String> {
    let globals = page_globals(ctx.globals, &page.front_matter, page);
    let mut content = render_liquid(&page.content, ctx.parser, &globals)?;

    if page.is_markdown() {
        content = ctx.markdown.render(&content);
    }

    apply_layouts(content, page, ctx)
}

fn apply_layouts(mut content: String, page: &Page, ctx: &RenderContext) -> BoxResult<String> {
    let mut data = page.front_matter.clone();
    let mut next = page.front_matter.layout().map(|l| l.to_string());
    let mut depth = 0;

    while let Some(name) = next {
        depth += 1;
        if depth > MAX_LAYOUT_DEPTH {
            return Err(SiteError::Template(format!(
                "Layout chain too deep (cycle?) at '{}' for {}", name, page.relative_path.display()
            )).into());
        }

        let layout = ctx.layouts.get(&name).ok_or_else(|| SiteError::Template(format!(
            "Layout '{}' not found for {}", name, page.relative_path.display()
        )))?;

        data = layout.front_matter.merged_under(&data);
        let mut globals = page_globals(ctx.globals, &data, page);
        globals.insert("content".into(), Value::scalar(content));

        content = render_liquid(&layout.content, ctx.parser, &globals)?;
        next = layout.front_matter.layout().map(|l| l.to_string());
    }

    Ok(content)
}

/// Site globals, then front matter keys, then `page`
fn page_globals(site_globals: &Object, front_matter: &FrontMatter, page: &Page) -> Object {
    let mut globals = site_globals.clone();

    for (key, value) in front_matter.to_liquid() {
        globals.insert(key, value);
    }
    globals.insert("page".into(), Value::Object(page.to_liquid()));

    globals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, MarkdownConfig};
    use crate::liquid::create_parser;

    fn page(relative: &str, source: &str) -> Page {
        let (front_matter, content) = crate::front_matter::extract_front_matter(source).unwrap();
        let output_path = crate::builder::page::determine_output_path(Path::new(relative), &front_matter);
        let url = output_path.as_deref().map(crate::builder::page::url_for_output);

        Page {
            path: PathBuf::from(relative),
            relative_path: PathBuf::from(relative),
            output_path,
            url,
            date: None,
            date_created: None,
            date_modified: None,
            front_matter,
            content,
        }
    }

    fn layout(source: &str) -> LayoutInfo {
        let (front_matter, content) = crate::front_matter::extract_front_matter(source).unwrap();
        LayoutInfo { content, front_matter }
    }

    struct Fixture {
        parser: Parser,
        layouts: HashMap<String, LayoutInfo>,
        markdown: MarkdownRenderer,
        transforms: TransformRegistry,
        globals: Object,
    }

    impl Fixture {
        fn new() -> Self {
            let mut layouts = HashMap::new();
            layouts.insert("base".to_string(), layout("<html><title>{{ title }} | {{ site.title }}</title>{{ content }}</html>"));
            layouts.insert("post".to_string(), layout("---\nlayout: base\nauthor: Ada\n---\n<article>{{ content }}<p>{{ author }}</p></article>"));
            layouts.insert("loop".to_string(), layout("---\nlayout: loop\n---\n{{ content }}"));

            let mut globals = Object::new();
            globals.insert("site".into(), Value::Object(liquid::object!({ "title": "Blog" })));

            Fixture {
                parser: create_parser(&HashMap::new()).unwrap(),
                layouts,
                markdown: MarkdownRenderer::new(&MarkdownConfig::default()),
                transforms: TransformRegistry::from_config(&Config::default()),
                globals,
            }
        }

        fn ctx<'a>(&'a self, output_dir: &'a Path) -> RenderContext<'a> {
            RenderContext {
                parser: &self.parser,
                layouts: &self.layouts,
                markdown: &self.markdown,
                transforms: &self.transforms,
                globals: &self.globals,
                output_dir,
            }
        }
    }

    #[test]
    fn test_markdown_page_through_layout_chain() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(Path::new("/unused"));
        let page = page("hello.md", "---\ntitle: Hello\nlayout: post\n---\nHi from {{ page.url }}");

        let html = render_page(&page, &ctx).unwrap();

        assert!(html.starts_with("<html><title>Hello | Blog</title><article>"));
        assert!(html.contains("<p>Hi from /hello/</p>"));
        assert!(html.contains("<p>Ada</p>"));
    }

    #[test]
    fn test_html_page_is_not_markdown() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(Path::new("/unused"));
        let page = page("raw.html", "# {{ 1 | plus: 1 }}");

        assert_eq!(render_page(&page, &ctx).unwrap(), "# 2");
    }

    #[test]
    fn test_missing_and_cyclic_layouts() {
        let fixture = Fixture::new();
        let ctx = fixture.ctx(Path::new("/unused"));

        let err = render_page(&page("a.md", "---\nlayout: nope\n---\nx"), &ctx).unwrap_err();
        assert!(err.to_string().contains("Layout 'nope' not found"));

        let err = render_page(&page("b.md", "---\nlayout: loop\n---\nx"), &ctx).unwrap_err();
        assert!(err.to_string().contains("too deep"));
    }

    #[test]
    fn test_process_pages_counts_and_annotates() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = Fixture::new();
        let ctx = fixture.ctx(dir.path());

        let pages = vec![
            page("index.md", "See [docs](https://example.com/docs)."),
            page("draft.md", "---\npermalink: false\n---\nDraft"),
            page("broken.md", "{% if %}"),
        ];

        let stats = process_pages(&pages, &ctx).unwrap();
        assert_eq!(stats, ProcessStats { written: 1, skipped: 1, failed: 1 });

        let html = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(html.contains(
            "<a class=\"external-link\" href=\"https://example.com/docs\" target=\"_blank\" rel=\"nofollow noopener noreferrer\">docs</a>"
        ));
    }

    #[test]
    fn test_duplicate_output_paths_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = Fixture::new();
        let ctx = fixture.ctx(dir.path());

        let pages = vec![
            page("about.md", "first"),
            page("about/index.md", "second"),
        ];

        let err = process_pages(&pages, &ctx).unwrap_err().to_string();
        assert!(err.contains("Duplicate output path"));
        assert!(err.contains("about.md"));
        assert!(err.contains("index.md"));
        assert!(!dir.path().join("about/index.html").exists());

        let pages = vec![
            page("a.md", "---\npermalink: /same/\n---\na"),
            page("b.md", "---\npermalink: /same/index.html\n---\nb"),
            page("c.md", "---\npermalink: false\n---\nc"),
            page("d.md", "---\npermalink: false\n---\nd"),
        ];
        assert!(process_pages(&pages, &ctx).is_err());
    }
}
