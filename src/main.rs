use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use miette::IntoDiagnostic;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use library_catalog::config::AppConfig;
use library_catalog::core::logging;
use library_catalog::tui::app::AppState;
use library_catalog::tui::events::{Action, AppEvent};
use library_catalog::tui::services::Services;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    let _log_guard = logging::init();
    log::info!("{} v{} starting", library_catalog::NAME, library_catalog::VERSION);

    let config = AppConfig::load().into_diagnostic()?;
    let services = Services::init(&config)?;

    // External shutdown requests (SIGINT outside raw mode) come in as actions.
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = event_tx.send(AppEvent::Action(Action::Quit));
        }
    });

    // Setup terminal
    enable_raw_mode().into_diagnostic()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).into_diagnostic()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).into_diagnostic()?;

    // Run the app
    let mut app = AppState::new(event_rx, services);
    let result = app
        .run(&mut terminal, Duration::from_millis(config.tui.tick_rate_ms))
        .await;

    // Restore terminal
    disable_raw_mode().into_diagnostic()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).into_diagnostic()?;
    terminal.show_cursor().into_diagnostic()?;

    if let Err(e) = &result {
        log::error!("Terminal loop failed: {e}");
    }
    result.into_diagnostic()
}
