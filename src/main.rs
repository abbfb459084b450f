//! Utsav - Festival Portal Client
//!
//! A terminal client for the Utsav festival portal. Covers login and
//! registration, the published events catalogue, committee membership
//! with roster management, and the admin and branch representative
//! dashboards.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

mod domain;
mod application;
mod infrastructure;
mod presentation;

use application::App;
use infrastructure::{ApiJob, ApiOutcome, PortalClient, SessionStore, spawn_worker};
use presentation::{render_ui, InputHandler};

/// Entry point for the Utsav portal client.
///
/// Sets up the terminal interface, restores any saved session, starts
/// the request worker, and runs the main event loop until the user
/// quits.
///
/// # Errors
///
/// Returns an error if terminal setup fails or if there are issues
/// with the terminal interface during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let store = SessionStore::from_env();
    let mut app = App::new(store.load());

    let (job_tx, job_rx) = mpsc::channel();
    let (outcome_tx, outcome_rx) = mpsc::channel();
    spawn_worker(PortalClient::from_env(), job_rx, outcome_tx);

    let res = run_app(&mut terminal, &mut app, &store, &job_tx, &outcome_rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Renders the interface, hands queued requests to the worker, feeds
/// keyboard input to the handler, and applies finished outcomes back
/// into the state. Continues running until the user presses Ctrl+Q.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &SessionStore,
    jobs: &Sender<ApiJob>,
    outcomes: &Receiver<ApiOutcome>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        pump_requests(app, jobs);

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                    }
                }
            }
        }

        while let Ok(outcome) = outcomes.try_recv() {
            app.apply_outcome(outcome);
        }

        pump_requests(app, jobs);
        persist_session(app, store);
    }
}

/// Sends every queued request to the worker, stamped with the current
/// session token.
fn pump_requests(app: &mut App, jobs: &Sender<ApiJob>) {
    let token = app.session.as_ref().map(|s| s.token.clone());
    for request in app.take_outbox() {
        // A failed send means the worker is gone and the loop is ending
        let _ = jobs.send(ApiJob {
            token: token.clone(),
            request,
        });
    }
}

/// Writes or removes the session file after a session change.
fn persist_session(app: &mut App, store: &SessionStore) {
    if !app.take_session_dirty() {
        return;
    }
    let result = match app.session.as_ref() {
        Some(session) => store.save(session),
        None => store.clear(),
    };
    if let Err(error) = result {
        app.status_message = Some(format!("Session file error: {}", error));
    }
}
