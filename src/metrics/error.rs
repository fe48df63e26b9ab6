use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures while reading event logs or writing figures
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed event record: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("checksum mismatch in {} at byte {offset}", .path.display())]
    Checksum { path: PathBuf, offset: u64 },

    #[error("no event files found in {}", .0.display())]
    NoEventFiles(PathBuf),

    #[error("series `{0}` not found in the event log")]
    MissingSeries(String),

    #[error("steps of series `{tag}` differ from those of `{reference}`")]
    StepMismatch { tag: String, reference: String },

    #[error("column `{0}` not found in the table")]
    MissingColumn(String),

    #[error("failed to render figure: {0}")]
    Render(String),

    #[error("failed to write table: {0}")]
    Csv(#[from] csv::Error),
}
