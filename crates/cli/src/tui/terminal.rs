// Raw mode, alternate screen and mouse capture for the lifetime of the viewer

use std::io::stdout;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};

/// Restores the terminal on drop, including on error and panic unwind.
pub(crate) struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub(crate) fn enter() -> Result<Self, String> {
        terminal::enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {}", e))?;
        // From here on Drop undoes whatever did get applied
        let session = Self { _private: () };
        stdout()
            .execute(EnterAlternateScreen)
            .map_err(|e| format!("failed to enter alternate screen: {}", e))?;
        stdout()
            .execute(EnableMouseCapture)
            .map_err(|e| format!("failed to enable mouse capture: {}", e))?;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = stdout().execute(DisableMouseCapture);
        let _ = stdout().execute(LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        log::debug!("terminal restored");
    }
}
