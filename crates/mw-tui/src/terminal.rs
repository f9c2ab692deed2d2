//! Raw-mode and alternate-screen setup that undoes itself

use std::io;

use crossterm::{
    cursor, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

/// Runs a restore action when dropped, so early returns and panics unwind
/// through it
pub struct RestoreOnDrop<F: FnOnce()> {
    restore: Option<F>,
}

impl<F: FnOnce()> RestoreOnDrop<F> {
    pub fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }
}

impl<F: FnOnce()> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
}

/// Enable raw mode and switch to the alternate screen.
///
/// The returned guard puts the terminal back when dropped. If entering the
/// alternate screen fails, raw mode is already undone when this returns.
pub fn enter() -> io::Result<RestoreOnDrop<fn()>> {
    enable_raw_mode()?;
    let guard = RestoreOnDrop::new(restore_terminal as fn());
    execute!(io::stdout(), EnterAlternateScreen)?;
    Ok(guard)
}
