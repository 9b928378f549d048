//! Scripted walkthrough of the job registry.
//!
//! Run with: cargo run --bin demo

use label_jobs::{config::AppConfig, demo, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration from environment: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config);

    let mut stdout = std::io::stdout().lock();
    match demo::run(&mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Demo failed");
            ExitCode::FAILURE
        }
    }
}
