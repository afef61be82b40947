use std::path::PathBuf;

use ratatui::style::{Modifier, Style};
use tui_textarea::TextArea;

use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DocMode {
    View,
    Edit,
}

/// A file opened in the viewer or the editor.
pub(crate) struct Document {
    pub(crate) path: PathBuf,
    pub(crate) mode: DocMode,
    pub(crate) editor: TextArea<'static>,
    pub(crate) dirty: bool,
    pub(crate) loading: bool,
    pub(crate) load_id: Option<u64>,
    pub(crate) save_id: Option<u64>,
    /// Buffer handed to the running save, compared against on completion.
    pub(crate) saving_text: Option<String>,
    pub(crate) leave_after_save: bool,
    pub(crate) view_scroll: usize,
    /// Terminator after each line but the last, as read from disk.
    endings: Vec<&'static str>,
    /// What follows the last line: nothing, `\n`, `\r\n` or a lone `\r`.
    tail: &'static str,
    /// Used for lines added by editing.
    default_ending: &'static str,
}

fn split_terminator(segment: &str) -> (&str, &'static str) {
    if let Some(line) = segment.strip_suffix("\r\n") {
        (line, "\r\n")
    } else if let Some(line) = segment.strip_suffix('\n') {
        (line, "\n")
    } else if let Some(line) = segment.strip_suffix('\r') {
        (line, "\r")
    } else {
        (segment, "")
    }
}

impl Document {
    pub(crate) fn loading(path: PathBuf, mode: DocMode, load_id: u64) -> Self {
        Self {
            path,
            mode,
            editor: TextArea::default(),
            dirty: false,
            loading: true,
            load_id: Some(load_id),
            save_id: None,
            saving_text: None,
            leave_after_save: false,
            view_scroll: 0,
            endings: Vec::new(),
            tail: "",
            default_ending: "\n",
        }
    }

    /// Replaces the buffer with freshly loaded text.
    pub(crate) fn set_text(&mut self, text: &str, theme: &Theme) {
        let mut lines = Vec::new();
        let mut endings = Vec::new();
        // Only a final segment can end in a lone `\r`; earlier ones keep it as text.
        for segment in text.split_inclusive('\n') {
            let (line, ending) = split_terminator(segment);
            lines.push(line.to_string());
            endings.push(ending);
        }
        self.tail = endings.pop().unwrap_or("");
        self.default_ending = endings
            .iter()
            .chain([&self.tail])
            .copied()
            .find(|e| e.contains('\n'))
            .unwrap_or("\n");
        self.endings = endings;
        let mut editor = TextArea::new(lines);
        editor.set_cursor_line_style(Style::default().add_modifier(Modifier::UNDERLINED));
        editor.set_style(Style::default().fg(theme.fg).bg(theme.bg));
        self.editor = editor;
        self.loading = false;
        self.load_id = None;
        self.dirty = false;
        self.view_scroll = 0;
    }

    /// The buffer as it would be written to disk.
    pub(crate) fn text(&self) -> String {
        let lines = self.editor.lines();
        let mut out = String::new();
        for (idx, line) in lines.iter().enumerate() {
            out.push_str(line);
            if idx + 1 == lines.len() {
                out.push_str(self.tail);
            } else {
                out.push_str(self.endings.get(idx).copied().unwrap_or(self.default_ending));
            }
        }
        out
    }

    pub(crate) fn line_count(&self) -> usize {
        self.editor.lines().len()
    }

    pub(crate) fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub(crate) fn scroll_view(&mut self, delta: isize, page: usize) {
        let max = self.line_count().saturating_sub(page.max(1));
        self.view_scroll = self.view_scroll.saturating_add_signed(delta).min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(text: &str) -> Document {
        let mut doc = Document::loading(PathBuf::from("a.txt"), DocMode::View, 1);
        doc.set_text(text, &Theme::default());
        doc
    }

    #[test]
    fn text_reproduces_loaded_buffer() {
        for text in [
            "",
            "\n",
            "single",
            "a\nb\n",
            "a\n\nb",
            "win\r\ndows\r\n",
            "a\nb\r\n",
            "a\r\nb\n",
            "a\r",
            "x\r\ny\r",
            "mid\rline\n",
            "\r\n\r\n",
        ] {
            assert_eq!(doc_with(text).text(), text, "buffer {text:?}");
        }
    }

    #[test]
    fn lone_cr_is_not_shown_as_text() {
        let doc = doc_with("x\r\ny\r");
        assert_eq!(doc.editor.lines(), ["x", "y"]);
    }

    #[test]
    fn added_lines_use_the_file_line_ending() {
        let mut doc = doc_with("one\r\ntwo\r\n");
        doc.editor.move_cursor(tui_textarea::CursorMove::Bottom);
        doc.editor.move_cursor(tui_textarea::CursorMove::End);
        doc.editor.insert_newline();
        doc.editor.insert_str("three");
        assert_eq!(doc.text(), "one\r\ntwo\r\nthree\r\n");
    }

    #[test]
    fn set_text_clears_loading_state() {
        let doc = doc_with("x\ny\n");
        assert!(!doc.loading);
        assert!(doc.load_id.is_none());
        assert_eq!(doc.line_count(), 2);
    }

    #[test]
    fn view_scroll_is_clamped() {
        let mut doc = doc_with("1\n2\n3\n4\n5\n");
        doc.scroll_view(10, 2);
        assert_eq!(doc.view_scroll, 3);
        doc.scroll_view(-10, 2);
        assert_eq!(doc.view_scroll, 0);
    }
}
