//! Alternate-screen session for the event loop
//!
//! `TerminalSession::enter` puts the terminal in raw mode on the alternate
//! screen. The session switches back when it is restored, dropped, or when
//! the process panics while it is open.

use std::io::{self, Stdout, Write};
use std::ops::{Deref, DerefMut};
use std::sync::Once;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::Result;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

pub struct TerminalSession {
    terminal: Tui,
    restored: bool,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        hook_panics();

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self {
                terminal,
                restored: false,
            }),
            Err(e) => {
                let _ = leave(&mut io::stdout());
                Err(e.into())
            }
        }
    }

    /// Switch back to the normal screen, reporting failures
    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        leave(self.terminal.backend_mut())
    }
}

impl Deref for TerminalSession {
    type Target = Tui;

    fn deref(&self) -> &Tui {
        &self.terminal
    }
}

impl DerefMut for TerminalSession {
    fn deref_mut(&mut self) -> &mut Tui {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if !self.restored {
            let _ = leave(self.terminal.backend_mut());
        }
    }
}

fn leave(out: &mut impl Write) -> Result<()> {
    execute!(out, LeaveAlternateScreen, Show)?;
    disable_raw_mode()?;
    Ok(())
}

/// Chain a hook that restores the screen before the panic message prints
fn hook_panics() {
    static HOOK: Once = Once::new();

    HOOK.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = leave(&mut io::stdout());
            original(info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leave_writes_screen_and_cursor_sequences() {
        let mut out = Vec::new();
        leave(&mut out).unwrap();

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"));
        assert!(written.contains("\x1b[?25h"));
    }

    #[test]
    fn test_panic_hook_installed_once() {
        hook_panics();
        hook_panics();
    }
}
