use crate::models::{SetupConfig, SshyError, SshResult};
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// What `ensure_entry` did to the ignore file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreFileUpdate {
    Created,
    Appended,
    AlreadyPresent,
}

/// Keeps the key folder out of version control
pub struct IgnoreFileUpdater {
    path: PathBuf,
    marker: String,
}

impl IgnoreFileUpdater {
    pub fn new(config: &SetupConfig) -> Self {
        Self {
            path: config.ignore_file_path(),
            marker: config.key_folder.clone(),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Ensure the ignore file mentions the marker
    ///
    /// Presence is a substring check, so an existing `/.sshy/` or `.sshy*`
    /// entry also counts.
    pub async fn ensure_entry(&self) -> SshResult<IgnoreFileUpdate> {
        if !self.path.exists() {
            fs::write(&self.path, format!("{}\n", self.marker))
                .await
                .map_err(|e| SshyError::io("create", &self.path, e))?;
            log::info!("[ignore_file] Created {}", self.path.display());
            return Ok(IgnoreFileUpdate::Created);
        }

        let bytes = fs::read(&self.path)
            .await
            .map_err(|e| SshyError::io("read", &self.path, e))?;
        let content = String::from_utf8_lossy(&bytes);

        if content.contains(self.marker.as_str()) {
            log::debug!(
                "[ignore_file] {} already lists {}",
                self.path.display(),
                self.marker
            );
            return Ok(IgnoreFileUpdate::AlreadyPresent);
        }

        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| SshyError::io("open", &self.path, e))?;
        file.write_all(format!("\n{}\n", self.marker).as_bytes())
            .await
            .map_err(|e| SshyError::io("append to", &self.path, e))?;
        file.flush()
            .await
            .map_err(|e| SshyError::io("append to", &self.path, e))?;

        log::info!(
            "[ignore_file] Appended {} to {}",
            self.marker,
            self.path.display()
        );
        Ok(IgnoreFileUpdate::Appended)
    }
}
