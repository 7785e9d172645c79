pub mod commands;
pub mod models;
pub mod services;
pub mod utils;

use colored::Colorize;
use commands::{run_setup, Cli, Command, SetupFailure, SetupStep};
use models::SetupConfig;
use tokio::io::BufReader;

/// Run a parsed command against the real terminal and environment
pub async fn run_command(cli: Cli) -> Result<(), SetupFailure> {
    match &cli.command {
        Command::Setup => {
            log::info!("[setup] Starting setup");
            let result = match SetupConfig::from_env() {
                Ok(mut config) => {
                    cli.apply(&mut config);
                    log::debug!("[setup] Config: {:?}", config);

                    let mut input = BufReader::new(tokio::io::stdin());
                    let mut output = std::io::stdout();
                    run_setup(&config, &mut input, &mut output).await
                }
                Err(e) => Err(SetupFailure::new(SetupStep::Configure, e)),
            };

            match result {
                Ok(report) => {
                    log::info!(
                        "[setup] Done, Host {} added to {}",
                        report.target.alias(),
                        report.ssh_config_path.display()
                    );
                    Ok(())
                }
                Err(failure) => {
                    log::error!("[setup] {} ({})", failure, failure.error.error_type());
                    eprintln!(
                        "{} {}",
                        "An error occurred during setup:".red(),
                        failure
                    );
                    Err(failure)
                }
            }
        }
    }
}
