//! uniwork - a terminal panel for Trello boards.
//!
//! Loads the optional config file, starts file logging, and runs the panel
//! until the user quits.

mod logging;

use std::sync::Arc;

use tracing::{info, warn};
use uniwork_config::{Config, FileCredentialStore};
use uniwork_session::runtime::response_channel;
use uniwork_tui::{App, Connection, terminal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    let _logging_guard = logging::init_logging(config.log_level.as_deref());
    info!(base_url = config.base_url(), "starting uniwork");

    let store = Arc::new(FileCredentialStore::user_default()?);
    let (responses, mut receiver) = response_channel();
    let connection = Connection::new(config.base_url(), store, responses);

    // Install before entering raw mode so a panic restores the terminal.
    terminal::install_panic_hook();
    let mut terminal = terminal::setup_terminal()?;

    let mut app = App::new(connection);
    app.open();
    let result = app.run(&mut terminal, &mut receiver).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    if let Err(err) = app.save_credentials() {
        warn!(error = %err, "failed to save credentials on exit");
    }
    info!("bye");
    result
}
