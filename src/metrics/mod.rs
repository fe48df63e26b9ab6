mod error;
pub mod event;
mod export;
mod figure;
pub mod record;
mod smoothing;
mod table;

pub use error::ExportError;
pub use event::{EventFileWriter, ScalarEvent, ScalarLog};
pub use export::{
    export_run, figures, load_table, ExportConfig, ALPHA, FIGURES_DIR, LOG_DIR, TAGS, X_SERIES,
    Y_SERIES,
};
#[cfg(feature = "plot")]
pub use figure::PngRenderer;
pub use figure::{Figure, Renderer};
pub use smoothing::ewma;
pub use table::{short_name, Table};
