use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
#[cfg(test)]
use std::time::Duration;

use tracing::{debug, error};

use crate::error::FsError;
use crate::fs_ops::{self, FileContent};

#[derive(Debug)]
pub(crate) enum TaskResult {
    Loaded {
        id: u64,
        result: Result<FileContent, FsError>,
    },
    Saved {
        id: u64,
        path: PathBuf,
        result: Result<(), FsError>,
    },
}

impl TaskResult {
    pub(crate) fn id(&self) -> u64 {
        match self {
            Self::Loaded { id, .. } | Self::Saved { id, .. } => *id,
        }
    }
}

/// Runs file reads and writes off the UI thread. Each request gets its own
/// worker; results come back through `poll`.
pub(crate) struct TaskRunner {
    tx: Sender<TaskResult>,
    rx: Receiver<TaskResult>,
    next_id: u64,
    in_flight: usize,
}

impl TaskRunner {
    pub(crate) fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            next_id: 1,
            in_flight: 0,
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.in_flight += 1;
        id
    }

    /// Runs `work` on its own thread. The result is reported exactly once,
    /// as an `Io` error if the worker panics.
    fn spawn<T, W, R>(&mut self, op: &'static str, path: PathBuf, work: W, report: R) -> u64
    where
        T: 'static,
        W: FnOnce(&Path) -> Result<T, FsError> + Send + 'static,
        R: FnOnce(u64, PathBuf, Result<T, FsError>) -> TaskResult + Send + 'static,
    {
        let id = self.next_id();
        let tx = self.tx.clone();
        debug!(id, op, path = %path.display(), "spawning task");
        thread::spawn(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(|| work(&path))).unwrap_or_else(|_| {
                error!(id, op, path = %path.display(), "worker panicked");
                Err(FsError::Io {
                    op,
                    path: path.clone(),
                    source: io::Error::other("worker panicked"),
                })
            });
            let _ = tx.send(report(id, path, result));
        });
        id
    }

    pub(crate) fn load(&mut self, path: PathBuf) -> u64 {
        self.spawn("load", path, fs_ops::read_text, |id, _, result| {
            TaskResult::Loaded { id, result }
        })
    }

    pub(crate) fn save(&mut self, path: PathBuf, text: String) -> u64 {
        self.spawn(
            "save",
            path,
            move |path| fs_ops::write_text(path, &text),
            |id, path, result| TaskResult::Saved { id, path, result },
        )
    }

    pub(crate) fn poll(&mut self) -> Vec<TaskResult> {
        let mut out = Vec::new();
        while let Ok(result) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            out.push(result);
        }
        out
    }

    /// Blocks until one result arrives or `timeout` passes.
    #[cfg(test)]
    pub(crate) fn wait(&mut self, timeout: Duration) -> Option<TaskResult> {
        let result = self.rx.recv_timeout(timeout).ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(result)
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.in_flight > 0
    }
}
