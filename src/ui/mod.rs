use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, List, ListItem as ListRow, ListState, Paragraph, Wrap};

use crate::app::App;
use crate::document::DocMode;
use crate::entry::ListItem;
use crate::types::{PendingAction, Screen, StatusKind};
use crate::util::{to_u16_saturating, truncate_to_width};

mod helpers;

use helpers::{centered_rect, keybind_line, list_item_style, themed_block};

const CREDITS: &str = "lazytxt\n\n\
A small file browser and plain-text editor for the terminal.\n\
Built on ratatui and ratatui-textarea.\n\n\
Press any key to close.";

pub(crate) fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    // Rows inside the bordered main pane.
    app.page_height = usize::from(chunks[0].height.saturating_sub(2));

    match app.screen {
        Screen::Browser => draw_browser(frame, app, chunks[0]),
        Screen::Document => draw_document(frame, app, chunks[0]),
    }
    draw_status(frame, app, chunks[1]);
    draw_footer(frame, app, chunks[2]);

    if let Some(prompt) = app.prompt.as_ref() {
        let area = centered_rect(60, 3, frame.area());
        frame.render_widget(Clear, area);
        let block = themed_block(&app.theme).title(format!(" {} ", prompt.title));
        let input = Paragraph::new(format!("{}_", prompt.value))
            .style(Style::default().fg(app.theme.fg))
            .block(block);
        frame.render_widget(input, area);
    }
    if let Some(question) = pending_question(&app.pending) {
        let area = centered_rect(60, 4, frame.area());
        frame.render_widget(Clear, area);
        let text = Paragraph::new(question)
            .style(Style::default().fg(app.theme.fg))
            .wrap(Wrap { trim: true })
            .block(themed_block(&app.theme).title(" Confirm "));
        frame.render_widget(text, area);
    }
    if app.credits_open {
        let area = centered_rect(60, 8, frame.area());
        frame.render_widget(Clear, area);
        let text = Paragraph::new(CREDITS)
            .style(Style::default().fg(app.theme.fg))
            .wrap(Wrap { trim: false })
            .block(themed_block(&app.theme).title(" Credits "));
        frame.render_widget(text, area);
    }
}

fn pending_question(pending: &PendingAction) -> Option<String> {
    match pending {
        PendingAction::None => None,
        PendingAction::Delete { target, is_dir } => {
            let name = target
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| target.display().to_string());
            Some(if *is_dir {
                format!("Delete folder '{name}' and everything in it? (y/n)")
            } else {
                format!("Delete '{name}'? This cannot be undone. (y/n)")
            })
        }
        PendingAction::SaveOnLeave => {
            Some("Do you want to save the file? (y)es / (n)o / (c)ancel".to_string())
        }
    }
}

fn location_title(app: &App) -> String {
    if app.listing.dir.as_os_str().is_empty() {
        " Storage ".to_string()
    } else {
        format!(" {} ", app.listing.dir.display())
    }
}

fn draw_browser(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let width = usize::from(area.width.saturating_sub(4));
    let rows: Vec<ListRow> = app
        .listing
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let selected = idx == app.selected;
            let line = match item {
                ListItem::Entry(entry) if entry.is_dir => {
                    format!("▸ {}", truncate_to_width(&entry.name, width.saturating_sub(2)))
                }
                ListItem::Entry(entry) => {
                    format!("  {}", truncate_to_width(&entry.name, width.saturating_sub(2)))
                }
                ListItem::EmptyFolder => truncate_to_width(item.label(), width),
            };
            let style = match item {
                ListItem::EmptyFolder if !selected => Style::default()
                    .fg(theme.fg_muted)
                    .add_modifier(Modifier::ITALIC),
                _ => list_item_style(selected, theme),
            };
            ListRow::new(line).style(style)
        })
        .collect();
    let list = List::new(rows).block(themed_block(theme).title(location_title(app)));
    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_document(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme.clone();
    let Some(doc) = app.document.as_mut() else {
        return;
    };
    let mut title = format!(" {} ", doc.file_name());
    if doc.mode == DocMode::Edit {
        title.push_str(if doc.dirty { "[edit +] " } else { "[edit] " });
    }
    let block = themed_block(&theme).title(title);

    if doc.loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(theme.fg_muted))
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    match doc.mode {
        DocMode::View => {
            let lines: Vec<Line> = doc
                .editor
                .lines()
                .iter()
                .map(|l| Line::from(l.as_str()))
                .collect();
            let text = Paragraph::new(lines)
                .style(Style::default().fg(theme.fg))
                .scroll((to_u16_saturating(doc.view_scroll), 0))
                .block(block);
            frame.render_widget(text, area);
        }
        DocMode::Edit => {
            doc.editor.set_block(block);
            frame.render_widget(&doc.editor, area);
        }
    }
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let Some(status) = app.status.as_ref() else {
        if app.tasks.is_busy() {
            let working = Span::styled("Working...", Style::default().fg(app.theme.fg_muted));
            frame.render_widget(Paragraph::new(Line::from(working)), area);
        }
        return;
    };
    let color = match status.kind {
        StatusKind::Info => app.theme.accent_secondary,
        StatusKind::Error => app.theme.error,
    };
    let width = usize::from(area.width);
    let line = Line::from(Span::styled(
        truncate_to_width(&status.text, width),
        Style::default().fg(color),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let entries: &[(&str, &str)] = match (app.screen, app.document.as_ref().map(|d| d.mode)) {
        (Screen::Document, Some(DocMode::Edit)) => &[("^S", "save"), ("Esc", "back")],
        (Screen::Document, _) => &[("e", "edit"), ("↑↓", "scroll"), ("Esc", "back")],
        (Screen::Browser, _) => &[
            ("⏎", "open"),
            ("⌫", "back"),
            ("n", "new"),
            ("r", "rename"),
            ("d", "delete"),
            ("?", "credits"),
            ("q", "quit"),
        ],
    };
    frame.render_widget(Paragraph::new(keybind_line(entries, &app.theme)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::fs;
    use tempfile::tempdir;

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn browser_shows_dirs_then_files() {
        let tmp = tempdir().unwrap();
        fs::create_dir(tmp.path().join("Docs")).unwrap();
        fs::write(tmp.path().join("alpha.txt"), "").unwrap();
        let mut app = App::new(test_config(), Some(tmp.path().to_path_buf())).unwrap();
        let screen = render(&mut app);
        let docs = screen.find("▸ Docs").unwrap();
        let alpha = screen.find("alpha.txt").unwrap();
        assert!(docs < alpha);
        assert_eq!(app.page_height, 8);
    }

    #[test]
    fn delete_prompt_is_rendered() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("x.txt"), "").unwrap();
        let mut app = App::new(test_config(), Some(tmp.path().to_path_buf())).unwrap();
        app.begin_delete();
        assert!(render(&mut app).contains("Delete 'x.txt'?"));
    }

    #[test]
    fn viewer_renders_file_text() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("read.txt");
        fs::write(&path, "hello from disk\n").unwrap();
        let mut app = App::new(test_config(), Some(path)).unwrap();
        settle(&mut app);
        let screen = render(&mut app);
        assert!(screen.contains("read.txt"));
        assert!(screen.contains("hello from disk"));
    }
}
