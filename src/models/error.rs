use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SshyError {
    // 檔案系統錯誤
    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },

    // 密鑰錯誤
    #[error("Key folder already exists: {path} (remove it to generate a new key)")]
    KeyFolderExists { path: String },

    #[error("Key not found: {path}")]
    KeyNotFound { path: String },

    #[error("Identity file path cannot be written to ssh config: {path} ({reason})")]
    UnsupportedIdentityPath { path: String, reason: String },

    // 外部程序錯誤
    #[error("Could not run {program}: {message}")]
    KeygenUnavailable { program: String, message: String },

    #[error("Key generation failed ({status}): {stderr}")]
    KeygenFailed { status: String, stderr: String },

    // 使用者輸入錯誤
    #[error("Invalid host target '{input}': {reason}")]
    InvalidHostTarget { input: String, reason: String },

    #[error("Prompt aborted: {reason}")]
    PromptAborted { reason: String },
}

impl From<std::io::Error> for SshyError {
    fn from(e: std::io::Error) -> Self {
        SshyError::IoError {
            message: e.to_string(),
        }
    }
}

pub type SshResult<T> = Result<T, SshyError>;

impl SshyError {
    pub fn error_type(&self) -> &'static str {
        match self {
            SshyError::IoError { .. } => "IoError",
            SshyError::HomeDirNotFound => "HomeDirNotFound",
            SshyError::InvalidPath { .. } => "InvalidPath",
            SshyError::KeyFolderExists { .. } => "KeyFolderExists",
            SshyError::KeyNotFound { .. } => "KeyNotFound",
            SshyError::UnsupportedIdentityPath { .. } => "UnsupportedIdentityPath",
            SshyError::KeygenUnavailable { .. } => "KeygenUnavailable",
            SshyError::KeygenFailed { .. } => "KeygenFailed",
            SshyError::InvalidHostTarget { .. } => "InvalidHostTarget",
            SshyError::PromptAborted { .. } => "PromptAborted",
        }
    }

    /// Wrap an I/O error with the path it happened on
    pub fn io(action: &str, path: &std::path::Path, e: std::io::Error) -> Self {
        SshyError::IoError {
            message: format!("Failed to {} {}: {}", action, path.display(), e),
        }
    }
}
