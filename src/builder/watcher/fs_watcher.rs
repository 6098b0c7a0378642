use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::Duration;

use log::{debug, error, info};
use notify::{Event, EventKind, RecursiveMode, Result as NotifyResult, Watcher};

use crate::builder::site::build_site;
use crate::config::Config;
use crate::styles::compile_stylesheet;
use crate::utils::error::{BoxResult, SiteError};

const DEBOUNCE_DURATION: Duration = Duration::from_millis(500);

/// What a batch of file changes calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rebuild {
    Nothing,
    Stylesheet,
    Site,
}

/// Decide what to rebuild for the changed `paths`. Output dir changes are
/// ignored, stylesheet dir changes only need the stylesheet.
pub fn classify_change(paths: &[PathBuf], config: &Config) -> Rebuild {
    let output_dir = config.output_dir();
    let stylesheet_dir = stylesheet_dir(config);

    paths
        .iter()
        .map(|path| {
            if path.starts_with(&output_dir) {
                Rebuild::Nothing
            } else if stylesheet_dir.as_ref().is_some_and(|dir| path.starts_with(dir)) {
                Rebuild::Stylesheet
            } else {
                Rebuild::Site
            }
        })
        .max()
        .unwrap_or(Rebuild::Nothing)
}

/// Build the site, then rebuild on every change below the input directory
pub fn watch_site(config: &Config) -> BoxResult<()> {
    let config = with_canonical_root(config);
    let input_dir = config.input_dir();
    info!("Watching input directory: {}", input_dir.display());

    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res: NotifyResult<Event>| {
        match res {
            Ok(event) => {
                if let EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) = event.kind {
                    tx.send(event).unwrap_or_else(|e| {
                        error!("Error sending file event: {}", e);
                    });
                }
            }
            Err(e) => error!("Watch error: {}", e),
        }
    })
    .map_err(SiteError::from)?;

    watcher.watch(&input_dir, RecursiveMode::Recursive).map_err(SiteError::from)?;
    if let Some(dir) = stylesheet_dir(&config) {
        if dir.is_dir() && !dir.starts_with(&input_dir) {
            info!("Watching stylesheet directory: {}", dir.display());
            watcher.watch(&dir, RecursiveMode::Recursive).map_err(SiteError::from)?;
        }
    }

    if let Err(e) = build_site(&config) {
        error!("Error building site: {}", e);
    }

    info!("Watching for changes. Press Ctrl+C to stop.");

    loop {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(event) => {
                debug!("File event: {:?}", event);
                let mut paths = event.paths;

                // Collect everything that arrives within the debounce window
                std::thread::sleep(DEBOUNCE_DURATION);
                while let Ok(event) = rx.try_recv() {
                    paths.extend(event.paths);
                }

                rebuild(&config, classify_change(&paths, &config));
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(e) => {
                error!("Error receiving file events: {}", e);
                break;
            }
        }
    }

    Ok(())
}

fn rebuild(config: &Config, what: Rebuild) {
    match what {
        Rebuild::Nothing => debug!("Only output files changed, nothing to rebuild"),
        Rebuild::Stylesheet => {
            info!("Stylesheet change detected, recompiling...");
            if let Some((input, output)) = config.sass_paths() {
                if let Err(e) = compile_stylesheet(&input, &output, config.sass_style()) {
                    error!("Error compiling stylesheet: {}", e);
                }
            }
        }
        Rebuild::Site => {
            info!("File change detected, rebuilding site...");
            if let Err(e) = build_site(config) {
                error!("Error rebuilding site: {}", e);
            }
        }
    }
}

fn stylesheet_dir(config: &Config) -> Option<PathBuf> {
    config
        .sass_paths()
        .and_then(|(input, _)| input.parent().map(Path::to_path_buf))
}

/// Event paths are absolute on some platforms, so compare against a
/// canonical root
fn with_canonical_root(config: &Config) -> Config {
    let mut config = config.clone();
    match config.root.canonicalize() {
        Ok(root) => config.root = root,
        Err(e) => debug!("Could not canonicalize {}: {}", config.root.display(), e),
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SassConfig;

    fn config() -> Config {
        let mut config = Config::with_root("/site");
        config.sass = Some(SassConfig {
            input: PathBuf::from("src/_sass/main.scss"),
            output: PathBuf::from("dist/css/main.css"),
            style: Default::default(),
        });
        config
    }

    fn paths(paths: &[&str]) -> Vec<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_content_change_rebuilds_site() {
        assert_eq!(classify_change(&paths(&["/site/src/index.md"]), &config()), Rebuild::Site);
    }

    #[test]
    fn test_stylesheet_change_only_recompiles_css() {
        assert_eq!(
            classify_change(&paths(&["/site/src/_sass/_vars.scss"]), &config()),
            Rebuild::Stylesheet
        );
    }

    #[test]
    fn test_output_changes_ignored() {
        assert_eq!(
            classify_change(&paths(&["/site/dist/index.html", "/site/dist/css/main.css"]), &config()),
            Rebuild::Nothing
        );
        assert_eq!(classify_change(&[], &config()), Rebuild::Nothing);
    }

    #[test]
    fn test_mixed_batch_takes_widest_rebuild() {
        assert_eq!(
            classify_change(
                &paths(&["/site/dist/a.html", "/site/src/_sass/main.scss", "/site/src/about.md"]),
                &config()
            ),
            Rebuild::Site
        );
    }

    #[test]
    fn test_without_sass_everything_is_site() {
        let config = Config::with_root("/site");
        assert_eq!(
            classify_change(&paths(&["/site/src/_sass/main.scss"]), &config),
            Rebuild::Site
        );
    }
}
