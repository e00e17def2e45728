//! Rail KM - command line cell functions
//!
//! Every subcommand resolves one planar point (RD New by default) to a single value:
//! a kilometer position along a rail line, the lines at that point, or the schematic
//! drawing sheets covering it. The value is printed on stdout; failures are printed as
//! `Error: <message>` and exit with a non-zero status.

mod cells;
mod geometry;
mod logging;
mod metadata;
mod settings;

use settings::Settings;
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::setup_logging();
    metadata::log_version_info();

    let settings = Settings::from_cli();

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(cells::evaluate(&settings)) {
        Ok(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            println!("{}", cells::error_cell(&e));
            ExitCode::FAILURE
        }
    }
}
