use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

/// Watches the directory currently shown in the browser.
pub(crate) struct DirWatcher {
    watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    current: Option<PathBuf>,
}

impl DirWatcher {
    pub(crate) fn new() -> notify::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        Ok(Self {
            watcher,
            rx,
            current: None,
        })
    }

    /// Switches the watch to `dir`, or stops watching with `None`.
    pub(crate) fn watch(&mut self, dir: Option<&Path>) {
        if self.current.as_deref() == dir {
            return;
        }
        if let Some(old) = self.current.take() {
            let _ = self.watcher.unwatch(&old);
        }
        let Some(dir) = dir else {
            return;
        };
        match self.watcher.watch(dir, RecursiveMode::NonRecursive) {
            Ok(()) => {
                debug!(dir = %dir.display(), "watching");
                self.current = Some(dir.to_path_buf());
            }
            Err(err) => warn!(dir = %dir.display(), error = %err, "cannot watch directory"),
        }
    }

    /// Drains pending events; true if any of them changed the listing.
    pub(crate) fn take_changed(&self) -> bool {
        let mut changed = false;
        while let Ok(res) = self.rx.try_recv() {
            match res {
                Ok(event) => {
                    if matches!(
                        event.kind,
                        EventKind::Create(_) | EventKind::Remove(_) | EventKind::Modify(_)
                    ) {
                        changed = true;
                    }
                }
                Err(err) => warn!(error = %err, "watch error"),
            }
        }
        changed
    }
}
