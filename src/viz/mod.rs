use std::io;

use crate::metrics::Figure;

pub use self::app::App;

mod app;
mod components;
mod tui;
mod util;

/// Browse `figures` in the terminal until the user quits
///
/// Log records reach the "Logs" tab only if `tui_logger` was initialized by the caller.
pub fn preview(figures: Vec<Figure>) -> io::Result<()> {
    App::new(figures).run()
}
