//! Board TUI entry point and terminal setup.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::CrosstermBackend, Terminal};
use tracing::info;

use crate::fields::ViewMode;
use crate::storage::KeyValueStore;
use crate::store::TaskStore;
use crate::tui::app::App;

/// Initialise the terminal, run the board until the user quits, and restore
/// the terminal even when the loop fails.
pub fn run_tui<S: KeyValueStore>(store: TaskStore<S>, view: ViewMode) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(tasks = store.len(), ?view, "board ui started");
    let mut app = App::new(store, view);
    let result = event_loop(&mut app, &mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    info!("board ui stopped");

    result
}

fn event_loop<S: KeyValueStore, B: Backend>(app: &mut App<S>, terminal: &mut Terminal<B>) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_key(key) {
                return Ok(());
            }
        }
    }
}
