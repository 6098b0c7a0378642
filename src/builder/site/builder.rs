use std::time::Instant;

use liquid::model::Value;
use liquid::Object;
use log::{debug, info};

use crate::builder::page::collect_pages;
use crate::builder::copy_passthrough;
use crate::builder::site::{load_includes, load_layouts, process_pages, RenderContext};
use crate::collections::{load_data_files, Collections};
use crate::config::Config;
use crate::liquid::create_parser;
use crate::markdown::MarkdownRenderer;
use crate::styles::compile_stylesheet;
use crate::transform::TransformRegistry;
use crate::utils::error::{BoxResult, SiteError};
use crate::utils::fs;

/// Summary of a finished build
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildStats {
    pub pages_written: usize,
    pub pages_skipped: usize,
    pub files_copied: usize,
    pub stylesheet_compiled: bool,
}

/// Build the whole site into the output directory
pub fn build_site(config: &Config) -> BoxResult<BuildStats> {
    let start = Instant::now();
    info!("Building site from {}", config.input_dir().display());

    let output_dir = config.output_dir();
    fs::create_directory(&output_dir)?;

    let layouts = load_layouts(&config.layouts_dir())?;
    let includes = load_includes(&config.includes_dir())?;
    let parser = create_parser(&includes)?;
    let markdown = MarkdownRenderer::new(&config.markdown);
    let transforms = TransformRegistry::from_config(config);
    debug!("Transforms: {:?}", transforms.names());

    let mut pages = collect_pages(config)?;
    let collections = Collections::build(&mut pages, config)?;
    for name in collections.names() {
        let count = collections.get(name).map_or(0, |members| members.len());
        debug!("Collection '{}' has {} items", name, count);
    }
    let globals = site_globals(config, &collections.to_liquid(&pages))?;

    let ctx = RenderContext {
        parser: &parser,
        layouts: &layouts,
        markdown: &markdown,
        transforms: &transforms,
        globals: &globals,
        output_dir: &output_dir,
    };
    let page_stats = process_pages(&pages, &ctx)?;

    let files_copied = copy_passthrough(config)?;

    let stylesheet_compiled = match config.sass_paths() {
        Some((input, output)) => {
            compile_stylesheet(&input, &output, config.sass_style())?;
            true
        }
        None => false,
    };

    if page_stats.failed > 0 {
        return Err(SiteError::Generic(format!(
            "{} of {} pages failed to build", page_stats.failed, pages.len()
        )).into());
    }

    info!(
        "Wrote {} pages and copied {} files in {:.2}s",
        page_stats.written,
        files_copied,
        start.elapsed().as_secs_f64()
    );

    Ok(BuildStats {
        pages_written: page_stats.written,
        pages_skipped: page_stats.skipped,
        files_copied,
        stylesheet_compiled,
    })
}

/// Remove the output directory
pub fn clean_site(config: &Config) -> BoxResult<()> {
    let output_dir = config.output_dir();
    info!("Removing {}", output_dir.display());
    fs::remove_directory(&output_dir)
}

/// Data files first, so `site` and `collections` cannot be shadowed
fn site_globals(config: &Config, collections: &Object) -> BoxResult<Object> {
    let mut globals = load_data_files(&config.data_dir())?;

    globals.insert("site".into(), config.site_value());
    globals.insert("collections".into(), Value::Object(collections.clone()));

    Ok(globals)
}
