mod calendar;
mod cli;
mod config;
mod logging;
mod plan;
mod runner;
mod storage;
mod walker;

use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let app = cli::parse();
    logging::init(app.verbose);
    runner::run(app).map(ExitCode::from)
}
