use super::App;
use std::io;

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tui_textarea::Input;

use crate::document::DocMode;
use crate::types::{PendingAction, Screen};

impl App {
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> io::Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
            self.quit = true;
            return Ok(());
        }

        if self.credits_open {
            self.credits_open = false;
            return Ok(());
        }
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return Ok(());
        }
        if self.pending != PendingAction::None {
            self.handle_pending_key(key);
            return Ok(());
        }

        match self.screen {
            Screen::Browser => self.handle_browser_key(key),
            Screen::Document => {
                self.handle_document_key(key);
                Ok(())
            }
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Enter => {
                if let Some(prompt) = self.prompt.take() {
                    self.apply_prompt(prompt.mode, prompt.value);
                }
            }
            KeyCode::Backspace => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.value.pop();
                }
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.value.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_pending_key(&mut self, key: KeyEvent) {
        let pending = std::mem::replace(&mut self.pending, PendingAction::None);
        match pending {
            PendingAction::None => {}
            PendingAction::Delete { target, is_dir } => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => self.confirm_delete(target),
                KeyCode::Char('n') | KeyCode::Esc => {}
                _ => self.pending = PendingAction::Delete { target, is_dir },
            },
            PendingAction::SaveOnLeave => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => self.save_and_leave(),
                KeyCode::Char('n') => self.close_document(),
                KeyCode::Char('c') | KeyCode::Esc => {}
                _ => self.pending = PendingAction::SaveOnLeave,
            },
        }
    }

    fn handle_browser_key(&mut self, key: KeyEvent) -> io::Result<()> {
        let page = self.page_height.max(1) as isize;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-page),
            KeyCode::PageDown => self.move_selection(page),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = self.listing.items.len().saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => self.activate_selected()?,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
                if !self.go_back() {
                    self.quit = true;
                }
            }
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('n') => self.create_new_file(),
            KeyCode::Char('r') | KeyCode::F(2) => self.begin_rename(),
            KeyCode::Char('d') | KeyCode::Delete => self.begin_delete(),
            KeyCode::F(5) => {
                self.refresh_listing();
                self.set_status("Refreshed");
            }
            KeyCode::Char('?') | KeyCode::F(1) => self.credits_open = true,
            _ => {}
        }
        Ok(())
    }

    fn handle_document_key(&mut self, key: KeyEvent) {
        let Some(mode) = self.document.as_ref().map(|d| d.mode) else {
            self.screen = Screen::Browser;
            return;
        };
        match mode {
            DocMode::View => self.handle_viewer_key(key),
            DocMode::Edit => self.handle_editor_key(key),
        }
    }

    fn handle_viewer_key(&mut self, key: KeyEvent) {
        let page = self.page_height.max(1);
        let Some(doc) = self.document.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => doc.scroll_view(-1, page),
            KeyCode::Down | KeyCode::Char('j') => doc.scroll_view(1, page),
            KeyCode::PageUp => doc.scroll_view(-(page as isize), page),
            KeyCode::PageDown | KeyCode::Char(' ') => doc.scroll_view(page as isize, page),
            KeyCode::Home | KeyCode::Char('g') => doc.view_scroll = 0,
            KeyCode::End | KeyCode::Char('G') => doc.scroll_view(isize::MAX, page),
            KeyCode::Char('e') => self.start_edit(),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('q') => {
                self.close_document();
            }
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            self.save_document();
            return;
        }
        if key.code == KeyCode::Esc {
            self.leave_document();
            return;
        }
        let Some(doc) = self.document.as_mut() else {
            return;
        };
        if doc.loading {
            return;
        }
        if doc.editor.input(Input::from(Event::Key(key))) {
            doc.dirty = true;
        }
    }
}
