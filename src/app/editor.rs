use super::App;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::document::{DocMode, Document};
use crate::task::TaskResult;
use crate::types::{PendingAction, Screen};

impl App {
    /// Opens a file from the browser, refusing anything that is not text.
    pub(crate) fn open_entry(&mut self, path: PathBuf) -> io::Result<()> {
        if !self.config.is_openable(&path) {
            self.set_error("Please select a .txt file");
            return Ok(());
        }
        self.open_document(path, DocMode::View);
        Ok(())
    }

    pub(crate) fn open_document(&mut self, path: PathBuf, mode: DocMode) {
        let id = self.tasks.load(path.clone());
        self.document = Some(Document::loading(path, mode, id));
        self.screen = Screen::Document;
    }

    /// Switches the viewer to the editor, re-reading the file from disk.
    pub(crate) fn start_edit(&mut self) {
        let Some(doc) = self.document.as_ref() else {
            return;
        };
        if doc.loading {
            return;
        }
        let path = doc.path.clone();
        self.open_document(path, DocMode::Edit);
    }

    pub(crate) fn save_document(&mut self) {
        let Some(doc) = self.document.as_mut() else {
            return;
        };
        if doc.loading || doc.save_id.is_some() {
            return;
        }
        let text = doc.text();
        let id = self.tasks.save(doc.path.clone(), text.clone());
        doc.save_id = Some(id);
        doc.saving_text = Some(text);
        self.set_status("Saving file...");
    }

    /// Leaves the document screen, asking first if there are unsaved edits.
    pub(crate) fn leave_document(&mut self) {
        if self.document.as_ref().is_some_and(|d| d.dirty) {
            self.pending = PendingAction::SaveOnLeave;
            return;
        }
        self.close_document();
    }

    /// Saves, then closes once the buffer on disk matches the editor. A save
    /// already in flight is followed by another if the buffer moved on.
    pub(crate) fn save_and_leave(&mut self) {
        self.save_document();
        match self.document.as_mut() {
            Some(doc) if doc.save_id.is_some() => doc.leave_after_save = true,
            _ => self.close_document(),
        }
    }

    pub(crate) fn close_document(&mut self) {
        self.document = None;
        self.screen = Screen::Browser;
        self.refresh_listing();
    }

    pub(crate) fn apply_task_result(&mut self, result: TaskResult) {
        let id = result.id();
        match result {
            TaskResult::Loaded { result, .. } => {
                let Some(doc) = self.document.as_mut().filter(|d| d.load_id == Some(id)) else {
                    debug!(id, "dropping stale load");
                    return;
                };
                match result {
                    Ok(content) => {
                        debug!(path = %content.path.display(), "document loaded");
                        doc.set_text(&content.text, &self.theme);
                        if content.is_blank() {
                            self.set_status("File is empty");
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "load failed");
                        self.set_error(err.user_message());
                        self.close_document();
                    }
                }
            }
            TaskResult::Saved { path, result, .. } => {
                let doc = self.document.as_mut().filter(|d| d.save_id == Some(id));
                match (doc, result) {
                    (Some(doc), Ok(())) => {
                        doc.save_id = None;
                        let saved = doc.saving_text.take();
                        doc.dirty = saved.is_none_or(|text| text != doc.text());
                        let leave = doc.leave_after_save;
                        if leave && doc.dirty {
                            debug!(id, "buffer changed during save, saving again");
                            self.save_document();
                            return;
                        }
                        self.set_status("File saved successfully");
                        if leave {
                            self.close_document();
                        }
                    }
                    (Some(doc), Err(err)) => {
                        warn!(error = %err, "save failed");
                        doc.save_id = None;
                        doc.saving_text = None;
                        doc.leave_after_save = false;
                        self.set_error(err.user_message());
                    }
                    (None, Ok(())) => {
                        debug!(path = %path.display(), "save finished after document closed");
                    }
                    (None, Err(err)) => self.set_error(err.user_message()),
                }
            }
        }
    }
}
