use std::process::ExitCode;

use clap::Parser;
use label_jobs::{
    app_state::AppState,
    cli::{self, Cli},
    config::AppConfig,
    logging,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration from environment: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config);

    // State lives for this invocation only
    let mut state = AppState::new();
    let mut stdout = std::io::stdout().lock();

    match cli::run(&cli, &mut state, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
