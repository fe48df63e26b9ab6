use std::error::Error;

use gridlab::{
    metrics::{figures, load_table, ExportConfig},
    viz,
};
use log::{info, LevelFilter};

fn main() -> Result<(), Box<dyn Error>> {
    tui_logger::init_logger(LevelFilter::Debug)?;
    tui_logger::set_default_level(LevelFilter::Debug);

    let config = ExportConfig::default();
    let table = load_table(&config)?;
    let figures = figures(&config, &table)?;
    info!("previewing {} figures from {}", figures.len(), config.log_dir.display());

    viz::preview(figures)?;
    Ok(())
}
