use crate::models::{SshyError, SshResult};
use std::path::{Path, PathBuf};

pub const DEFAULT_KEY_FOLDER: &str = ".sshy";
pub const DEFAULT_KEY_FILE_NAME: &str = "id_rsa";
pub const DEFAULT_IGNORE_FILE_NAME: &str = ".gitignore";
pub const DEFAULT_KEYGEN_PROGRAM: &str = "ssh-keygen";
pub const DEFAULT_KEY_BITS: u32 = 4096;
pub const DEFAULT_MAX_PROMPT_ATTEMPTS: u32 = 5;

/// Paths and tunables shared by every setup step
#[derive(Debug, Clone, PartialEq)]
pub struct SetupConfig {
    /// Directory the key folder and ignore file live in
    pub project_dir: PathBuf,
    pub key_folder: String,
    pub key_file_name: String,
    pub ignore_file_name: String,
    /// SSH client config that receives the host block
    pub ssh_config_path: PathBuf,
    pub keygen_program: String,
    pub key_bits: u32,
    /// Rejected prompt entries tolerated before giving up
    pub max_prompt_attempts: u32,
}

impl SetupConfig {
    /// Build a config for the current directory and the user's home
    pub fn from_env() -> SshResult<Self> {
        let project_dir = std::env::current_dir().map_err(|e| SshyError::IoError {
            message: format!("Failed to resolve current directory: {}", e),
        })?;
        let home = dirs::home_dir().ok_or(SshyError::HomeDirNotFound)?;
        Ok(Self::for_dirs(project_dir, home))
    }

    pub fn for_dirs(project_dir: impl Into<PathBuf>, home_dir: impl AsRef<Path>) -> Self {
        Self {
            project_dir: project_dir.into(),
            key_folder: DEFAULT_KEY_FOLDER.to_string(),
            key_file_name: DEFAULT_KEY_FILE_NAME.to_string(),
            ignore_file_name: DEFAULT_IGNORE_FILE_NAME.to_string(),
            ssh_config_path: home_dir.as_ref().join(".ssh").join("config"),
            keygen_program: DEFAULT_KEYGEN_PROGRAM.to_string(),
            key_bits: DEFAULT_KEY_BITS,
            max_prompt_attempts: DEFAULT_MAX_PROMPT_ATTEMPTS,
        }
    }

    pub fn key_dir(&self) -> PathBuf {
        self.project_dir.join(&self.key_folder)
    }

    pub fn private_key_path(&self) -> PathBuf {
        self.key_dir().join(&self.key_file_name)
    }

    pub fn public_key_path(&self) -> PathBuf {
        self.key_dir().join(format!("{}.pub", self.key_file_name))
    }

    pub fn ignore_file_path(&self) -> PathBuf {
        self.project_dir.join(&self.ignore_file_name)
    }
}
