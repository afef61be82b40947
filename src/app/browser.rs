use super::App;
use std::io;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::entry::{EMPTY_FOLDER_TEXT, ListItem};
use crate::error::FsError;
use crate::fs_ops;
use crate::types::{Location, PendingAction, PromptMode, PromptState};

impl App {
    pub(crate) fn current_dir(&self) -> Option<&PathBuf> {
        match self.stack.last() {
            Some(Location::Dir(dir)) => Some(dir),
            _ => None,
        }
    }

    pub(crate) fn selected_item(&self) -> Option<&ListItem> {
        self.listing.items.get(self.selected)
    }

    /// Re-reads the current location, keeping the selection on the same path.
    pub(crate) fn refresh_listing(&mut self) {
        let selected_path = self
            .selected_item()
            .and_then(ListItem::entry)
            .map(|e| e.path.clone());
        self.listing = match self.current_dir() {
            Some(dir) => fs_ops::list_dir(dir),
            None => fs_ops::storage_roots(&self.config.roots),
        };
        self.selected = selected_path
            .and_then(|p| self.listing.position_of(&p))
            .unwrap_or(self.selected)
            .min(self.listing.items.len().saturating_sub(1));
        let dir = self.current_dir().cloned();
        if let Some(watcher) = self.watcher.as_mut() {
            watcher.watch(dir.as_deref());
        }
    }

    pub(crate) fn navigate_to(&mut self, dir: PathBuf) {
        debug!(dir = %dir.display(), "enter directory");
        self.stack.push(Location::Dir(dir));
        self.selected = 0;
        self.refresh_listing();
    }

    /// Pops one location. Returns false when already at the roots screen.
    pub(crate) fn go_back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        let left = self.stack.pop();
        self.selected = 0;
        self.refresh_listing();
        if let Some(Location::Dir(dir)) = left {
            if let Some(idx) = self.listing.position_of(&dir) {
                self.selected = idx;
            }
        }
        true
    }

    pub(crate) fn move_selection(&mut self, delta: isize) {
        let last = self.listing.items.len().saturating_sub(1);
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    pub(crate) fn activate_selected(&mut self) -> io::Result<()> {
        let Some(item) = self.selected_item().cloned() else {
            return Ok(());
        };
        match item {
            ListItem::EmptyFolder => self.set_status(EMPTY_FOLDER_TEXT),
            ListItem::Entry(entry) if entry.is_dir => self.navigate_to(entry.path),
            ListItem::Entry(entry) => self.open_entry(entry.path)?,
        }
        Ok(())
    }

    pub(crate) fn create_new_file(&mut self) {
        let Some(dir) = self.current_dir().cloned() else {
            self.set_error("Open a folder first");
            return;
        };
        match fs_ops::create_new_file(&dir) {
            Ok(path) => {
                self.refresh_listing();
                if let Some(idx) = self.listing.position_of(&path) {
                    self.selected = idx;
                }
                // Offer a rename straight away, the generated name is a placeholder.
                self.begin_rename_of(path);
                self.set_status("File created successfully");
            }
            Err(err) => {
                let msg = match err {
                    FsError::PermissionDenied { .. } => "Cannot write to this folder".to_string(),
                    other => other.user_message(),
                };
                self.set_error(msg);
            }
        }
    }

    pub(crate) fn begin_rename(&mut self) {
        let Some(entry) = self.selected_item().and_then(ListItem::entry).cloned() else {
            return;
        };
        if self.current_dir().is_none() {
            self.set_error("Cannot rename a storage root");
            return;
        }
        self.begin_rename_of(entry.path);
    }

    fn begin_rename_of(&mut self, target: PathBuf) {
        let stem = if target.is_dir() {
            target.file_name()
        } else {
            target.file_stem()
        }
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
        self.prompt = Some(PromptState {
            title: "Enter file name".to_string(),
            value: stem,
            mode: PromptMode::Rename { target },
        });
    }

    pub(crate) fn apply_prompt(&mut self, mode: PromptMode, value: String) {
        match mode {
            PromptMode::Rename { target } => match fs_ops::rename_entry(&target, &value) {
                Ok(renamed) => {
                    self.refresh_listing();
                    if let Some(idx) = self.listing.position_of(&renamed) {
                        self.selected = idx;
                    }
                    self.set_status("File renamed successfully");
                }
                Err(err) => {
                    info!(target = %target.display(), error = %err, "rename rejected");
                    self.set_error(err.user_message());
                }
            },
        }
    }

    pub(crate) fn begin_delete(&mut self) {
        let Some(entry) = self.selected_item().and_then(ListItem::entry).cloned() else {
            return;
        };
        let Some(dir) = self.current_dir() else {
            self.set_error("Cannot delete a storage root");
            return;
        };
        if !fs_ops::is_writable_dir(dir) {
            self.set_error("File cannot be deleted");
            return;
        }
        let is_dir = fs_ops::is_real_dir(&entry.path);
        self.pending = PendingAction::Delete {
            target: entry.path,
            is_dir,
        };
    }

    pub(crate) fn confirm_delete(&mut self, target: PathBuf) {
        match fs_ops::delete_entry(&target) {
            Ok(()) => self.set_status("File deleted successfully"),
            Err(err) => {
                info!(target = %target.display(), error = %err, "delete failed");
                self.set_error("File cannot be deleted");
            }
        }
        self.refresh_listing();
    }
}

#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::app::test_support::*;
    use crate::entry::{EMPTY_FOLDER_TEXT, ListItem};
    use crate::types::{Location, PendingAction, Screen};
    use ratatui::crossterm::event::KeyCode;
    use std::fs;
    use tempfile::tempdir;

    fn app_in(dir: &std::path::Path) -> App {
        App::new(test_config(), Some(dir.to_path_buf())).unwrap()
    }

    #[test]
    fn enter_and_back_restore_selection() {
        let tmp = tempdir().unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();
        fs::create_dir(tmp.path().join("b")).unwrap();
        fs::write(tmp.path().join("b/inner.txt"), "").unwrap();
        let mut app = app_in(tmp.path());

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.current_dir(), Some(&tmp.path().join("b")));
        assert_eq!(app.listing.names(), ["inner.txt"]);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.current_dir(), Some(&tmp.path().to_path_buf()));
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn back_at_roots_quits() {
        let tmp = tempdir().unwrap();
        let mut app = app_in(tmp.path());
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.stack, vec![Location::Roots]);
        assert!(!app.quit);
        press(&mut app, KeyCode::Esc);
        assert!(app.quit);
    }

    #[test]
    fn empty_folder_placeholder_is_not_openable() {
        let tmp = tempdir().unwrap();
        let mut app = app_in(tmp.path());
        assert_eq!(app.listing.items, vec![ListItem::EmptyFolder]);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Browser);
        assert_eq!(status_text(&app), EMPTY_FOLDER_TEXT);
    }

    #[test]
    fn non_txt_files_are_refused() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("photo.png"), "").unwrap();
        let mut app = app_in(tmp.path());
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Browser);
        assert_eq!(status_text(&app), "Please select a .txt file");
    }

    #[test]
    fn new_file_then_rename_via_prompt() {
        let tmp = tempdir().unwrap();
        let mut app = app_in(tmp.path());
        press(&mut app, KeyCode::Char('n'));
        assert!(app.prompt.is_some());
        assert_eq!(app.listing.items.len(), 1);

        let prompt = app.prompt.as_mut().unwrap();
        prompt.value.clear();
        type_str(&mut app, "diary");
        press(&mut app, KeyCode::Enter);

        assert!(app.prompt.is_none());
        assert_eq!(app.listing.names(), ["diary.txt"]);
        assert_eq!(status_text(&app), "File renamed successfully");
    }

    #[test]
    fn rename_collision_is_reported_and_nothing_moves() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        fs::write(tmp.path().join("b.txt"), "b").unwrap();
        let mut app = app_in(tmp.path());

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.prompt.as_ref().unwrap().value, "a");
        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "b");
        press(&mut app, KeyCode::Enter);

        assert_eq!(status_text(&app), "File already exists");
        assert_eq!(app.listing.names(), ["a.txt", "b.txt"]);
    }

    #[test]
    fn rename_prompt_rejects_dot_names() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        let mut app = app_in(tmp.path());
        press(&mut app, KeyCode::Char('r'));
        app.prompt.as_mut().unwrap().value = ".hidden".to_string();
        press(&mut app, KeyCode::Enter);
        assert_eq!(status_text(&app), "Filename cannot start with a dot");
        assert!(tmp.path().join("a.txt").exists());
    }

    #[test]
    fn delete_requires_confirmation() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("gone.txt");
        fs::write(&file, "").unwrap();
        let mut app = app_in(tmp.path());

        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.pending, PendingAction::Delete { .. }));
        press(&mut app, KeyCode::Char('n'));
        assert!(file.exists());
        assert_eq!(app.pending, PendingAction::None);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(!file.exists());
        assert_eq!(app.listing.items, vec![ListItem::EmptyFolder]);
    }

    #[cfg(unix)]
    #[test]
    fn deleting_a_directory_link_keeps_its_target() {
        let tmp = tempdir().unwrap();
        let real = tmp.path().join("real");
        fs::create_dir(&real).unwrap();
        fs::write(real.join("inner.txt"), "keep").unwrap();
        let link = tmp.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        let mut app = app_in(tmp.path());
        assert_eq!(app.listing.names(), ["link", "real"]);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(
            app.pending,
            PendingAction::Delete {
                target: link.clone(),
                is_dir: false,
            }
        );
        press(&mut app, KeyCode::Char('y'));
        assert!(fs::symlink_metadata(&link).is_err());
        assert_eq!(fs::read_to_string(real.join("inner.txt")).unwrap(), "keep");
    }

    #[test]
    fn roots_cannot_be_renamed_or_deleted() {
        let tmp = tempdir().unwrap();
        let config = crate::config::Config {
            roots: vec![tmp.path().to_path_buf()],
            ..test_config()
        };
        let mut app = App::new(config, None).unwrap();
        press(&mut app, KeyCode::Char('r'));
        assert!(app.prompt.is_none());
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.pending, PendingAction::None);
        assert!(tmp.path().exists());
    }
}
