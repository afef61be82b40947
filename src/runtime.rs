use std::io;

use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event};

use crate::app::App;
use crate::ui;

/// Restores the terminal on every exit path once the UI has taken it over.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

pub(crate) fn run(app: &mut App) -> io::Result<()> {
    let mut terminal = ratatui::try_init()?;
    let _guard = TerminalGuard;
    run_loop(app, &mut terminal)
}

fn run_loop(app: &mut App, terminal: &mut DefaultTerminal) -> io::Result<()> {
    let tick = app.config.tick_rate();
    while !app.quit {
        terminal.draw(|frame| ui::draw(frame, app))?;
        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key)?;
            }
        }
        app.tick();
    }
    Ok(())
}
