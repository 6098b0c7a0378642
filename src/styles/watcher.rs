use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;

use log::{debug, error, info};
use notify::{Event, EventKind, RecursiveMode, Result as NotifyResult, Watcher};

use crate::config::SassStyle;
use crate::styles::compiler::compile_stylesheet;
use crate::utils::error::{BoxResult, SiteError};

/// Compile the stylesheet, then recompile after every change in the entry
/// file's directory. Compile errors are logged and watching goes on.
pub fn watch_stylesheet(input: &Path, output: &Path, style: SassStyle) -> BoxResult<()> {
    let watch_dir = input
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    if !watch_dir.is_dir() {
        return Err(SiteError::Stylesheet(format!(
            "Stylesheet directory does not exist: {}", watch_dir.display()
        )).into());
    }

    compile_logged(input, output, style);

    let (tx, rx) = channel();
    let mut watcher = notify::recommended_watcher(move |res: NotifyResult<Event>| {
        match res {
            Ok(event) => {
                tx.send(event).unwrap_or_else(|e| error!("Error sending file event: {}", e));
            }
            Err(e) => error!("Watch error: {}", e),
        }
    })
    .map_err(SiteError::from)?;
    watcher.watch(&watch_dir, RecursiveMode::NonRecursive).map_err(SiteError::from)?;

    info!("Watching {} for SCSS changes. Press Ctrl+C to stop.", watch_dir.display());

    for event in rx {
        debug!("File event: {:?}", event);
        let changed = changed_files(&event);
        if changed.is_empty() {
            continue;
        }

        for path in &changed {
            info!("SCSS file changed: {}", path.display());
        }
        compile_logged(input, output, style);
    }

    Ok(())
}

fn compile_logged(input: &Path, output: &Path, style: SassStyle) {
    if let Err(e) = compile_stylesheet(input, output, style) {
        error!("{}", e);
    }
}

/// Files touched by a create, modify or remove event
fn changed_files(event: &Event) -> Vec<PathBuf> {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => event.paths.clone(),
        _ => Vec::new(),
    }
}
