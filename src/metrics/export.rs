use std::{fs, path::PathBuf};

use log::{info, warn};

use super::{
    error::ExportError,
    event::ScalarLog,
    figure::{Figure, Renderer},
    table::Table,
};

/// Run directory the exporter reads by default
pub const LOG_DIR: &str = "results/gridworld/2022-03-29--16-59-22";
/// Series exported by default
pub const TAGS: [&str; 4] = [
    "1.Total_reward/1.Total_reward",
    "1.Total_reward/3.Episode_length",
    "2.Workers/1.Self_played_games",
    "2.Workers/3.Self_played_steps",
];
/// Default x axes, by short name
pub const X_SERIES: [&str; 2] = ["Self_played_games", "Self_played_steps"];
/// Default y axes, by short name
pub const Y_SERIES: [&str; 2] = ["Total_reward", "Episode_length"];
/// Default output directory
pub const FIGURES_DIR: &str = "figures";
/// Default smoothing factor
pub const ALPHA: f64 = 0.1;

/// What to export and where
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Directory holding the event files
    pub log_dir: PathBuf,
    /// Series to load, in order; the first one's steps are the reference
    pub tags: Vec<String>,
    /// Short names plotted on the x axis
    pub x_series: Vec<String>,
    /// Short names plotted on the y axis
    pub y_series: Vec<String>,
    pub out_dir: PathBuf,
    /// EWMA smoothing factor
    pub alpha: f64,
    /// Also dump the smoothed table here
    pub table_csv: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(LOG_DIR),
            tags: TAGS.map(String::from).to_vec(),
            x_series: X_SERIES.map(String::from).to_vec(),
            y_series: Y_SERIES.map(String::from).to_vec(),
            out_dir: PathBuf::from(FIGURES_DIR),
            alpha: ALPHA,
            table_csv: None,
        }
    }
}

impl ExportConfig {
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    pub fn with_out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }

    pub fn with_table_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.table_csv = Some(path.into());
        self
    }
}

/// Load the configured series, check they share steps, and smooth them
pub fn load_table(config: &ExportConfig) -> Result<Table, ExportError> {
    let log = ScalarLog::load(&config.log_dir)?;
    let table = Table::from_log(&log, config.tags.as_slice())?.smoothed(config.alpha);
    let (rows, cols) = table.shape();
    info!("smoothed table: {rows} rows x {cols} columns");
    Ok(table)
}

/// One figure per (x, y) pair, x-major
pub fn figures(config: &ExportConfig, table: &Table) -> Result<Vec<Figure>, ExportError> {
    let mut figures = Vec::with_capacity(config.x_series.len() * config.y_series.len());
    for x in &config.x_series {
        for y in &config.y_series {
            figures.push(Figure::line(table, x, y)?);
        }
    }
    Ok(figures)
}

/// Export every configured figure, returning the files written.
///
/// Nothing is written unless every series loads and aligns. Failing to create the output
/// directory is only logged; rendering into it then reports the error.
pub fn export_run<R: Renderer>(
    config: &ExportConfig,
    renderer: &R,
) -> Result<Vec<PathBuf>, ExportError> {
    let table = load_table(config)?;
    let figures = figures(config, &table)?;

    if let Err(e) = fs::create_dir_all(&config.out_dir) {
        warn!("could not create {}: {e}", config.out_dir.display());
    }
    if let Some(path) = &config.table_csv {
        table.write_csv(path)?;
    }

    let mut written = Vec::with_capacity(figures.len());
    for figure in &figures {
        let path = config.out_dir.join(figure.file_name());
        renderer.render(figure, &path)?;
        info!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
