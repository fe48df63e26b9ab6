use std::{
    io::{self, stdout, Stdout},
    panic,
};

use crossterm as ct;
use ct::{
    cursor::{Hide, Show},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;
use ratatui::{backend::CrosstermBackend, widgets::Widget, Terminal};

/// The alternate screen in raw mode, left again when dropped
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub fn enter() -> io::Result<Self> {
        let hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = leave();
            hook(info);
        }));

        ct::execute!(stdout(), EnterAlternateScreen, Hide)?;
        enable_raw_mode()?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self { terminal })
    }

    /// Draw `widget` over the whole screen
    pub fn draw<W: Widget>(&mut self, widget: W) -> io::Result<()> {
        self.terminal
            .draw(|frame| frame.render_widget(widget, frame.size()))?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = leave() {
            warn!("could not restore the terminal: {e}");
        }
    }
}

fn leave() -> io::Result<()> {
    disable_raw_mode()?;
    ct::execute!(stdout(), LeaveAlternateScreen, Show)
}
