//! Filesystem watching for rebuilds.
//!
//! Watches the project directory and forwards relevant changes over a
//! channel. Build outputs, `node_modules` and hidden paths are ignored so a
//! build never triggers itself.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, EventKind, PollWatcher, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::error::{CliError, Result};

/// How changes are detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchMode {
    Native,
    Poll(Duration),
}

impl WatchMode {
    pub fn from_poll(poll_ms: Option<u64>) -> Self {
        match poll_ms {
            Some(ms) => WatchMode::Poll(Duration::from_millis(ms)),
            None => WatchMode::Native,
        }
    }
}

/// Watches a project root recursively.
pub struct SourceWatcher {
    _watcher: Box<dyn Watcher + Send>,
    root: PathBuf,
}

impl SourceWatcher {
    /// Start watching `root`. `ignore` lists directories (relative to the
    /// root or absolute) whose changes are dropped.
    pub fn new(
        root: PathBuf,
        ignore: Vec<PathBuf>,
        mode: WatchMode,
    ) -> Result<(Self, mpsc::UnboundedReceiver<PathBuf>)> {
        if !root.exists() {
            return Err(CliError::FileNotFound(root));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let filter_root = root.clone();
        let ignore: Vec<PathBuf> = ignore
            .into_iter()
            .map(|p| if p.is_absolute() { p } else { root.join(p) })
            .collect();

        let handler = move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!(error = %err, "file watcher error");
                    return;
                }
            };
            if !matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
            ) {
                return;
            }
            for path in event.paths {
                if should_ignore(&path, &filter_root, &ignore) {
                    continue;
                }
                let _ = tx.send(path);
            }
        };

        let mut watcher: Box<dyn Watcher + Send> = match mode {
            WatchMode::Native => Box::new(RecommendedWatcher::new(handler, Config::default())?),
            WatchMode::Poll(interval) => {
                tracing::info!("Enabled polling ({} ms)", interval.as_millis());
                Box::new(PollWatcher::new(
                    handler,
                    Config::default().with_poll_interval(interval),
                )?)
            }
        };
        watcher.watch(&root, RecursiveMode::Recursive)?;

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Wait for the first change, then keep draining until `quiet` passes with
/// no further change. Returns the changed paths, or `None` once the watcher
/// is gone.
pub async fn next_batch(
    rx: &mut mpsc::UnboundedReceiver<PathBuf>,
    quiet: Duration,
) -> Option<Vec<PathBuf>> {
    let first = rx.recv().await?;
    let mut batch = vec![first];
    loop {
        match tokio::time::timeout(quiet, rx.recv()).await {
            Ok(Some(path)) => {
                if !batch.contains(&path) {
                    batch.push(path);
                }
            }
            Ok(None) | Err(_) => return Some(batch),
        }
    }
}

fn should_ignore(path: &Path, root: &Path, ignore: &[PathBuf]) -> bool {
    let Ok(rel) = path.strip_prefix(root) else {
        return true;
    };
    if ignore.iter().any(|dir| path.starts_with(dir)) {
        return true;
    }
    rel.components().any(|component| {
        component.as_os_str().to_str().is_some_and(|name| {
            name == "node_modules" || (name.starts_with('.') && name != "." && name != "..")
        })
    })
}
