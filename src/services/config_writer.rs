use crate::models::{HostTarget, SetupConfig, SshyError, SshResult};
use crate::services::permission_service::{OWNER_ONLY_DIR_MODE, OWNER_ONLY_FILE_MODE};
use crate::services::PermissionService;
use crate::utils::SshConfigParser;
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt};

pub const HOST_PROMPT: &str = "Please enter the hostname (format: user@hostname):";
pub const HOST_REQUIRED_WARNING: &str = "Hostname is required. Please provide a value.";

/// Adds a host block for the generated key to the SSH client config
pub struct ConfigWriter {
    config_path: PathBuf,
    private_key_path: PathBuf,
    max_attempts: u32,
}

impl ConfigWriter {
    pub fn new(config: &SetupConfig) -> Self {
        Self {
            config_path: config.ssh_config_path.clone(),
            private_key_path: config.private_key_path(),
            max_attempts: config.max_prompt_attempts.max(1),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Absolute path of the private key, which must already exist
    pub async fn identity_file(&self) -> SshResult<PathBuf> {
        if !self.private_key_path.exists() {
            return Err(SshyError::KeyNotFound {
                path: self.private_key_path.display().to_string(),
            });
        }

        fs::canonicalize(&self.private_key_path)
            .await
            .map_err(|e| SshyError::io("resolve", &self.private_key_path, e))
    }

    /// Ask for `user@hostname` until a usable answer arrives
    ///
    /// Empty and malformed answers are rejected with a warning. Gives up once
    /// `max_attempts` answers were rejected or the input is closed.
    pub async fn prompt_host_target<R, W>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> SshResult<HostTarget>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut rejected = 0;
        let mut line = String::new();

        loop {
            writeln!(output, "{}", HOST_PROMPT)?;
            output.flush()?;

            line.clear();
            let read = input
                .read_line(&mut line)
                .await
                .map_err(|e| SshyError::IoError {
                    message: format!("Failed to read host from input: {}", e),
                })?;
            if read == 0 {
                return Err(SshyError::PromptAborted {
                    reason: "input closed before a host was entered".to_string(),
                });
            }

            let answer = line.trim();
            if answer.is_empty() {
                writeln!(output, "{}", HOST_REQUIRED_WARNING.yellow())?;
            } else {
                match answer.parse::<HostTarget>() {
                    Ok(target) => {
                        log::info!("[config] Host target: {}", target);
                        return Ok(target);
                    }
                    Err(e) => {
                        log::debug!("[config] Rejected host target: {}", e);
                        writeln!(output, "{}", e.to_string().yellow())?;
                    }
                }
            }

            rejected += 1;
            if rejected >= self.max_attempts {
                return Err(SshyError::PromptAborted {
                    reason: format!("no valid host after {} attempts", rejected),
                });
            }
        }
    }

    /// Create the config file (mode 600) when missing; returns whether it was created
    pub async fn ensure_config_file(&self) -> SshResult<bool> {
        if self.config_path.exists() {
            return Ok(false);
        }

        if let Some(parent) = self.config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| SshyError::io("create", parent, e))?;
                PermissionService::set_mode(parent, OWNER_ONLY_DIR_MODE).await?;
            }
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(OWNER_ONLY_FILE_MODE);
        options
            .open(&self.config_path)
            .await
            .map_err(|e| SshyError::io("create", &self.config_path, e))?;

        // umask 可能遮掉部分權限，明確設定一次
        PermissionService::set_mode(&self.config_path, OWNER_ONLY_FILE_MODE).await?;

        log::info!("[config] Created {}", self.config_path.display());
        Ok(true)
    }

    /// Append the host block; the config file must exist
    pub async fn append_host_block(
        &self,
        target: &HostTarget,
        identity_file: &Path,
    ) -> SshResult<()> {
        let block = SshConfigParser::render_host_block(target, identity_file)?;

        let bytes = fs::read(&self.config_path)
            .await
            .map_err(|e| SshyError::io("read", &self.config_path, e))?;
        // Inspected only; the file is appended to, never rewritten
        let existing = String::from_utf8_lossy(&bytes);

        let hosts = SshConfigParser::parse(&existing);
        if let Some(host) = SshConfigParser::find_host(&hosts, target.alias()) {
            log::warn!(
                "[config] {} already has an entry matching {} (Host {}); ssh uses the first match",
                self.config_path.display(),
                target.alias(),
                host.host_pattern
            );
        }

        let mut entry = String::new();
        if !existing.is_empty() && !existing.ends_with('\n') {
            entry.push('\n');
        }
        entry.push_str(&block);

        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&self.config_path)
            .await
            .map_err(|e| SshyError::io("open", &self.config_path, e))?;
        file.write_all(entry.as_bytes())
            .await
            .map_err(|e| SshyError::io("append to", &self.config_path, e))?;
        file.flush()
            .await
            .map_err(|e| SshyError::io("append to", &self.config_path, e))?;

        log::info!(
            "[config] Added Host {} to {}",
            target.alias(),
            self.config_path.display()
        );
        Ok(())
    }
}
