use crate::models::{SetupConfig, SshyError, SshResult};
use crate::services::PermissionService;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::fs;
use tokio::process::Command;

/// How a finished `ssh-keygen` run should be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeygenStatus {
    /// Exit 0, nothing on stderr
    Clean,
    /// Exit 0 but stderr carried diagnostics; logged, not fatal
    WithDiagnostics(String),
    /// Non-zero exit, or no exit code at all (killed by a signal)
    Failed { code: Option<i32>, stderr: String },
}

/// Exit status is the only fatal signal; stderr alone never fails the run
pub fn classify_output(code: Option<i32>, stderr: &str) -> KeygenStatus {
    let stderr = stderr.trim();
    match code {
        Some(0) if stderr.is_empty() => KeygenStatus::Clean,
        Some(0) => KeygenStatus::WithDiagnostics(stderr.to_string()),
        code => KeygenStatus::Failed {
            code,
            stderr: stderr.to_string(),
        },
    }
}

/// A keypair written by the generator
#[derive(Debug, Clone)]
pub struct GeneratedKey {
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
    /// stderr text of a successful run, if any
    pub diagnostics: Option<String>,
}

/// Runs the external key generation utility into the project key folder
pub struct KeyGenerator {
    program: String,
    bits: u32,
    key_dir: PathBuf,
    private_key_path: PathBuf,
    public_key_path: PathBuf,
}

impl KeyGenerator {
    pub fn new(config: &SetupConfig) -> Self {
        Self {
            program: config.keygen_program.clone(),
            bits: config.key_bits,
            key_dir: config.key_dir(),
            private_key_path: config.private_key_path(),
            public_key_path: config.public_key_path(),
        }
    }

    /// Arguments passed to the utility: RSA, fixed size, empty passphrase, quiet
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-t", "rsa", "-b"].into_iter().map(OsString::from).collect();
        args.push(self.bits.to_string().into());
        args.push("-f".into());
        args.push(self.private_key_path.clone().into_os_string());
        args.extend(["-q", "-N", ""].into_iter().map(OsString::from));
        args
    }

    /// Create the key folder and generate a fresh keypair into it
    pub async fn generate(&self) -> SshResult<GeneratedKey> {
        // 已存在的資料夾代表上次執行留下的密鑰，不覆蓋
        if self.key_dir.exists() {
            return Err(SshyError::KeyFolderExists {
                path: self.key_dir.display().to_string(),
            });
        }

        fs::create_dir(&self.key_dir).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                SshyError::KeyFolderExists {
                    path: self.key_dir.display().to_string(),
                }
            } else {
                SshyError::io("create", &self.key_dir, e)
            }
        })?;

        log::info!(
            "[keygen] Running {} for {}",
            self.program,
            self.private_key_path.display()
        );

        let output = Command::new(&self.program)
            .args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;
        let output = match output {
            Ok(output) => output,
            Err(e) => {
                self.remove_key_dir().await;
                return Err(SshyError::KeygenUnavailable {
                    program: self.program.clone(),
                    message: e.to_string(),
                });
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        let diagnostics = match classify_output(output.status.code(), &stderr) {
            KeygenStatus::Clean => None,
            KeygenStatus::WithDiagnostics(text) => {
                log::warn!("[keygen] {} succeeded with stderr: {}", self.program, text);
                Some(text)
            }
            KeygenStatus::Failed { code, stderr } => {
                log::error!(
                    "[keygen] {} failed, code: {:?}, stderr: {}",
                    self.program,
                    code,
                    stderr
                );
                self.remove_key_dir().await;
                return Err(SshyError::KeygenFailed {
                    status: match code {
                        Some(code) => format!("exit code {}", code),
                        None => "terminated by signal".to_string(),
                    },
                    stderr,
                });
            }
        };

        if !self.private_key_path.exists() {
            return Err(SshyError::KeyNotFound {
                path: self.private_key_path.display().to_string(),
            });
        }

        PermissionService::ensure_owner_only(&self.private_key_path).await?;

        let private_key_path = fs::canonicalize(&self.private_key_path)
            .await
            .map_err(|e| SshyError::io("resolve", &self.private_key_path, e))?;

        log::info!("[keygen] Key created at {}", private_key_path.display());

        Ok(GeneratedKey {
            private_key_path,
            public_key_path: self.public_key_path.clone(),
            diagnostics,
        })
    }

    /// Remove the folder created for a run that produced no key
    ///
    /// `remove_dir` only removes an empty folder; anything the utility left
    /// behind stays for inspection.
    async fn remove_key_dir(&self) {
        if let Err(e) = fs::remove_dir(&self.key_dir).await {
            log::warn!(
                "[keygen] Could not remove {}: {}",
                self.key_dir.display(),
                e
            );
        }
    }
}
