use std::process::ExitCode;

use gridlab::metrics::{export_run, ExportConfig, PngRenderer};
use log::error;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ExportConfig::default();
    match export_run(&config, &PngRenderer::default()) {
        Ok(written) => {
            for path in written {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("export of {} failed: {e}", config.log_dir.display());
            ExitCode::FAILURE
        }
    }
}
