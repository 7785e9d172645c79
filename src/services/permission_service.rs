use crate::models::{SshyError, SshResult};
use std::path::Path;
use tokio::fs;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Mode for private keys and the SSH config (rw-------)
pub const OWNER_ONLY_FILE_MODE: u32 = 0o600;
/// Mode for a freshly created .ssh directory (rwx------)
pub const OWNER_ONLY_DIR_MODE: u32 = 0o700;

/// Permission check result
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionCheckResult {
    pub is_valid: bool,
    pub current_mode: Option<String>,
    pub expected_mode: String,
}

/// Permission service
pub struct PermissionService;

impl PermissionService {
    /// Compare the permission bits of `path` against `expected`
    #[cfg(unix)]
    pub async fn check_mode(path: &Path, expected: u32) -> SshResult<PermissionCheckResult> {
        if !path.exists() {
            return Err(SshyError::KeyNotFound {
                path: path.display().to_string(),
            });
        }

        let metadata = fs::metadata(path)
            .await
            .map_err(|e| SshyError::io("read metadata of", path, e))?;

        let file_mode = metadata.permissions().mode() & 0o777;

        Ok(PermissionCheckResult {
            is_valid: file_mode == expected,
            current_mode: Some(format!("{:03o}", file_mode)),
            expected_mode: format!("{:03o}", expected),
        })
    }

    #[cfg(not(unix))]
    pub async fn check_mode(path: &Path, expected: u32) -> SshResult<PermissionCheckResult> {
        if !path.exists() {
            return Err(SshyError::KeyNotFound {
                path: path.display().to_string(),
            });
        }

        // Windows 使用 ACL，不檢查 mode
        Ok(PermissionCheckResult {
            is_valid: true,
            current_mode: None,
            expected_mode: format!("{:03o}", expected),
        })
    }

    /// Set the permission bits of `path`
    #[cfg(unix)]
    pub async fn set_mode(path: &Path, mode: u32) -> SshResult<()> {
        let permissions = std::fs::Permissions::from_mode(mode);
        fs::set_permissions(path, permissions)
            .await
            .map_err(|e| SshyError::io("set permissions on", path, e))
    }

    #[cfg(not(unix))]
    pub async fn set_mode(_path: &Path, _mode: u32) -> SshResult<()> {
        Ok(())
    }

    /// Make sure a private key is readable by its owner only
    pub async fn ensure_owner_only(path: &Path) -> SshResult<PermissionCheckResult> {
        let check = Self::check_mode(path, OWNER_ONLY_FILE_MODE).await?;
        if check.is_valid {
            return Ok(check);
        }

        log::warn!(
            "[permissions] {} has mode {}, tightening to {}",
            path.display(),
            check.current_mode.as_deref().unwrap_or("?"),
            check.expected_mode
        );
        Self::set_mode(path, OWNER_ONLY_FILE_MODE).await?;
        Self::check_mode(path, OWNER_ONLY_FILE_MODE).await
    }
}
