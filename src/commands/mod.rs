use crate::models::SetupConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod setup;

pub use setup::{run_setup, SetupFailure, SetupReport, SetupStage, SetupStep};

#[derive(Parser, Debug)]
#[command(name = "sshy", version, about = "Project-local SSH key and config bootstrapper")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Key generation program
    #[arg(long, global = true, env = "SSHY_KEYGEN")]
    pub keygen: Option<String>,

    /// SSH client config to append to (default: ~/.ssh/config)
    #[arg(long, global = true, env = "SSHY_SSH_CONFIG")]
    pub ssh_config: Option<PathBuf>,

    /// Rejected host entries tolerated before setup gives up
    #[arg(long, global = true, env = "SSHY_MAX_PROMPT_ATTEMPTS")]
    pub max_attempts: Option<u32>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Setup ssh keys and config
    Setup,
}

impl Cli {
    /// Layer command line and environment overrides onto `config`
    pub fn apply(&self, config: &mut SetupConfig) {
        if let Some(keygen) = &self.keygen {
            config.keygen_program = keygen.clone();
        }
        if let Some(path) = &self.ssh_config {
            config.ssh_config_path = path.clone();
        }
        if let Some(attempts) = self.max_attempts {
            config.max_prompt_attempts = attempts;
        }
    }
}
