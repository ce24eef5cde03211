//! Raw mode, alternate screen, and mouse capture.
//!
//! The panel needs mouse capture for drag gestures, so setup and every
//! restore path (normal exit and panic) toggle it along with the screen.

use std::io::{self, Stdout};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

/// The terminal the panel draws on.
pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Error type for terminal operations.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    /// Entering raw mode or the alternate screen failed.
    #[error("failed to setup terminal: {0}")]
    Setup(#[source] io::Error),

    /// Leaving raw mode or the alternate screen failed.
    #[error("failed to restore terminal: {0}")]
    Restore(#[source] io::Error),
}

/// Enters raw mode and the alternate screen, with mouse capture on.
///
/// # Errors
///
/// Returns an error if any terminal operation fails.
///
/// # Examples
///
/// ```no_run
/// use uniwork_tui::terminal;
///
/// let mut terminal = terminal::setup_terminal()?;
/// terminal::restore_terminal(&mut terminal)?;
/// # Ok::<(), uniwork_tui::terminal::TerminalError>(())
/// ```
pub fn setup_terminal() -> Result<AppTerminal, TerminalError> {
    enable_raw_mode().map_err(TerminalError::Setup)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(TerminalError::Setup)?;
    debug!("terminal ready");
    Terminal::new(CrosstermBackend::new(stdout)).map_err(TerminalError::Setup)
}

/// Undoes [`setup_terminal`] and shows the cursor again.
///
/// # Errors
///
/// Returns an error if any terminal operation fails.
pub fn restore_terminal(terminal: &mut AppTerminal) -> Result<(), TerminalError> {
    disable_raw_mode().map_err(TerminalError::Restore)?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )
    .map_err(TerminalError::Restore)?;
    terminal.show_cursor().map_err(TerminalError::Restore)?;
    debug!("terminal restored");
    Ok(())
}

/// Chains a panic hook that leaves raw mode and the alternate screen before
/// the previous hook prints the panic.
///
/// Call once, before [`setup_terminal`].
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        previous(info);
    }));
}
