// src/ui.rs

use crate::app::{App, AppEvent, AppState};
use crate::chat_view;
use crate::key_handlers;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{error::Error, io, time::Duration};
use tokio::sync::mpsc::UnboundedReceiver;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs the terminal UI: raw-mode setup, the event loop, and teardown.
pub async fn run_ui(
    mut app: App,
    mut events_rx: UnboundedReceiver<AppEvent>,
) -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &mut events_rx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

/// The single-threaded session loop. All transcript mutation happens here:
/// gateway and greeting tasks only send events, drained between draws, so
/// input and rendering are never blocked by an in-flight request.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events_rx: &mut UnboundedReceiver<AppEvent>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| chat_view::draw_chat(f, app))?;

        while let Ok(event) = events_rx.try_recv() {
            app.handle_event(event);
        }

        if event::poll(INPUT_POLL_INTERVAL)? {
            if let CEvent::Key(key) = event::read()? {
                match app.state {
                    AppState::Chat => key_handlers::handle_chat_input(key, app),
                    AppState::QuitConfirm => key_handlers::handle_quit_confirm_input(key, app),
                    AppState::Quit => {}
                }
            }
        }

        if app.state == AppState::Quit {
            return Ok(());
        }
    }
}
