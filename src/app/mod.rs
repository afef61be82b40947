use std::io;
use std::path::PathBuf;
use std::time::Instant;

use tracing::warn;

use crate::config::Config;
use crate::document::Document;
use crate::entry::Listing;
use crate::fs_ops;
use crate::task::TaskRunner;
use crate::theme::Theme;
use crate::types::{Location, PendingAction, PromptState, Screen, StatusKind};
use crate::watcher::DirWatcher;

mod browser;
mod editor;
mod input;

#[derive(Debug, Clone)]
pub(crate) struct Status {
    pub(crate) text: String,
    pub(crate) kind: StatusKind,
    pub(crate) at: Instant,
}

pub(crate) struct App {
    pub(crate) config: Config,
    pub(crate) theme: Theme,
    /// Navigation back stack; the bottom is always `Location::Roots`.
    pub(crate) stack: Vec<Location>,
    pub(crate) listing: Listing,
    pub(crate) selected: usize,
    pub(crate) screen: Screen,
    pub(crate) document: Option<Document>,
    pub(crate) prompt: Option<PromptState>,
    pub(crate) pending: PendingAction,
    pub(crate) credits_open: bool,
    pub(crate) status: Option<Status>,
    pub(crate) tasks: TaskRunner,
    pub(crate) watcher: Option<DirWatcher>,
    pub(crate) page_height: usize,
    pub(crate) quit: bool,
}

impl App {
    pub(crate) fn new(config: Config, start: Option<PathBuf>) -> io::Result<Self> {
        let watcher = if config.watch {
            DirWatcher::new()
                .inspect_err(|err| warn!(error = %err, "directory watching disabled"))
                .ok()
        } else {
            None
        };
        let listing = fs_ops::storage_roots(&config.roots);
        let mut app = Self {
            config,
            theme: Theme::default(),
            stack: vec![Location::Roots],
            listing,
            selected: 0,
            screen: Screen::Browser,
            document: None,
            prompt: None,
            pending: PendingAction::None,
            credits_open: false,
            status: None,
            tasks: TaskRunner::new(),
            watcher,
            page_height: 10,
            quit: false,
        };

        if let Some(start) = start {
            let start = std::path::absolute(&start).unwrap_or(start);
            if start.is_dir() {
                app.navigate_to(start);
            } else if let Some(parent) = start.parent().filter(|p| p.is_dir()) {
                app.navigate_to(parent.to_path_buf());
                if let Some(idx) = app.listing.position_of(&start) {
                    app.selected = idx;
                }
                app.open_entry(start)?;
            } else {
                app.set_error(format!("File not found: {}", start.display()));
            }
        }
        Ok(app)
    }

    pub(crate) fn set_status<S: Into<String>>(&mut self, status: S) {
        self.status = Some(Status {
            text: status.into(),
            kind: StatusKind::Info,
            at: Instant::now(),
        });
    }

    pub(crate) fn set_error<S: Into<String>>(&mut self, status: S) {
        self.status = Some(Status {
            text: status.into(),
            kind: StatusKind::Error,
            at: Instant::now(),
        });
    }

    /// Applies finished background work, watcher events and status expiry.
    pub(crate) fn tick(&mut self) {
        for result in self.tasks.poll() {
            self.apply_task_result(result);
        }
        if self.watcher.as_ref().is_some_and(DirWatcher::take_changed) {
            self.refresh_listing();
        }
        let ttl = self.config.status_ttl();
        if self.status.as_ref().is_some_and(|s| s.at.elapsed() >= ttl) {
            self.status = None;
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use super::App;
    use crate::config::Config;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    pub(crate) fn test_config() -> Config {
        Config {
            watch: false,
            ..Config::default()
        }
    }

    pub(crate) fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub(crate) fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub(crate) fn press(app: &mut App, code: KeyCode) {
        app.handle_key(key(code)).unwrap();
    }

    pub(crate) fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// Waits for all background work and applies it.
    pub(crate) fn settle(app: &mut App) {
        while app.tasks.is_busy() {
            let result = app
                .tasks
                .wait(Duration::from_secs(5))
                .expect("background task timed out");
            app.apply_task_result(result);
        }
    }

    pub(crate) fn status_text(app: &App) -> &str {
        app.status.as_ref().map(|s| s.text.as_str()).unwrap_or("")
    }
}
