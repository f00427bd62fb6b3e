//! discharge-notes: command-line entrypoint.

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;

use discharge_notes::config::{Cli, Config};
use discharge_notes::output::Written;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print().ok();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    // .env may carry RUST_LOG as well as the API key
    let dotenv = dotenv::dotenv();

    discharge_notes::init_tracing(cli.log_json);

    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "No .env file loaded");
    }

    let config = Config::from_env(cli);

    match discharge_notes::run(&config).await {
        Ok(Written::File(path)) => {
            tracing::info!(path = %path.display(), "Done");
            ExitCode::SUCCESS
        }
        Ok(Written::Stdout) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
