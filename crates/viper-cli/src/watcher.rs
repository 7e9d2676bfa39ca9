use anyhow::Result;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;
use tracing::{error, info, warn};

/// Quiet period that closes a batch of changes
const DEBOUNCE: Duration = Duration::from_millis(300);

/// Watches the pages directory and hands out changed paths in batches
pub struct PageWatcher {
    rx: Receiver<PathBuf>,
    _watcher: notify::RecommendedWatcher,
}

impl PageWatcher {
    pub fn new(watch_paths: Vec<(PathBuf, RecursiveMode)>) -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    for path in event.paths {
                        // Receiver gone means the watch loop is shutting down
                        let _ = tx.send(path);
                    }
                }
            }
            Err(e) => error!("Watch error: {:?}", e),
        })?;

        for (path, mode) in watch_paths {
            if path.exists() {
                watcher.watch(&path, mode)?;
                info!("Watching: {:?}", path);
            } else {
                warn!("Path does not exist: {:?}", path);
            }
        }

        Ok(Self {
            rx,
            _watcher: watcher,
        })
    }

    /// Blocks for the next change, then collects everything that follows
    /// until the debounce window passes quietly
    ///
    /// `None` once the watcher has stopped.
    pub fn next_batch(&self) -> Option<BTreeSet<PathBuf>> {
        let first = self.rx.recv().ok()?;
        let mut batch = BTreeSet::from([first]);
        while let Ok(path) = self.rx.recv_timeout(DEBOUNCE) {
            batch.insert(path);
        }
        Some(batch)
    }
}
