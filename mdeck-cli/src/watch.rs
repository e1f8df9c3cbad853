//! Filesystem watching for the deck source
//!
//! Editors rarely write a file in place: many write a sibling and rename it
//! over the original. Watching the file itself loses track of it after the
//! first such save, so the watcher observes the source's parent directory and
//! filters events down to the source's file name.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, Debouncer};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Default debounce duration for filesystem events (in milliseconds).
const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Events emitted by the filesystem watcher.
#[derive(Debug, Clone)]
pub enum WatchEvent {
    /// The source file was created, written or replaced
    Modified(PathBuf),
}

/// Configuration for the filesystem watcher.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Debounce duration in milliseconds
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Debounced watcher for a single source file.
pub struct FileWatcher {
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    event_rx: mpsc::UnboundedReceiver<WatchEvent>,
}

impl FileWatcher {
    /// Start watching `source`.
    ///
    /// The file does not have to exist yet; its directory does.
    pub fn new(source: &Path, config: WatchConfig) -> Result<Self> {
        let file_name = source
            .file_name()
            .map(|name| name.to_os_string())
            .ok_or_else(|| Error::Watch(format!("not a file path: {}", source.display())))?;
        let dir = watch_dir(source);

        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut debouncer = new_debouncer(
            Duration::from_millis(config.debounce_ms),
            move |res: std::result::Result<Vec<DebouncedEvent>, notify::Error>| match res {
                Ok(events) => {
                    // one rebuild per batch is enough
                    if let Some(event) = events
                        .into_iter()
                        .find(|event| is_source(&event.path, &file_name))
                    {
                        debug!(path = %event.path.display(), "Source change detected");
                        if event_tx.send(WatchEvent::Modified(event.path)).is_err() {
                            debug!("Event receiver dropped, ignoring change");
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Filesystem watch error");
                }
            },
        )
        .map_err(|e| Error::Watch(format!("failed to create filesystem watcher: {e}")))?;

        debouncer
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| Error::Watch(format!("failed to watch {}: {e}", dir.display())))?;

        info!(
            path = %source.display(),
            debounce_ms = config.debounce_ms,
            "Started filesystem watcher"
        );

        Ok(Self {
            _debouncer: debouncer,
            event_rx,
        })
    }

    /// Receive the next watch event.
    ///
    /// Returns `None` if the watcher has been stopped.
    pub async fn recv(&mut self) -> Option<WatchEvent> {
        self.event_rx.recv().await
    }
}

fn watch_dir(source: &Path) -> PathBuf {
    match source.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn is_source(path: &Path, file_name: &OsString) -> bool {
    path.file_name() == Some(file_name.as_os_str())
}
