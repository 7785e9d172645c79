//! Common test utilities and helpers

#![allow(dead_code)]

use sshy_lib::models::SetupConfig;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Real 2048-bit RSA public key (SHA256:7MRM8FtD6yALtonb/05Xr6UmxiDPVvCXWrPP5E9oM/I)
pub const SAMPLE_RSA_PUBLIC_KEY: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQCvOnu1p9Z2XoWdP7CX4nE/AXvirdJUtgPf088hhFCHHtfivM0d7r/g0Yqxx6FE9C/ZmedidsExYkOswALA/VAlkRW3WAbvnIkbqqpNWuoy0w4yuTrMauUSJADF81tE8pQJfWX9k3r6x5frEPcmKNBh0/Ef/5Pd7R1OnPPTnLxT4E0fC/ywXcd3mgj7s/oXp5Xq/4TZAGz9aFAatqvD2luygN2OeUE4HHJAIcUaAlsn/fkSIj8VP8uzepBGq5Y0o2ErTwR5etHxzpyq+aoc/goMSKBTEeyDxJ/Zo8ozhpfC16cSd5NFK5H7tZ5lBJPlIiY5Z0eomfLz6ByiiqkjSAsB test@example";

/// Behaviour of a fake key generation program
pub enum FakeKeygen {
    /// Writes the keypair and exits 0
    Succeeds,
    /// Writes the keypair, prints to stderr, exits 0
    SucceedsWithWarning(&'static str),
    /// Prints to stderr and exits with the given code without writing keys
    Fails(i32),
}

/// A temporary project directory plus a temporary home directory
pub struct MockProject {
    pub temp_dir: TempDir,
    pub project_dir: PathBuf,
    pub home_dir: PathBuf,
}

impl MockProject {
    pub fn new() -> Self {
        Self::named("project")
    }

    /// Project directory with the given folder name, e.g. one containing spaces
    pub fn named(project_name: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let project_dir = temp_dir.path().join(project_name);
        let home_dir = temp_dir.path().join("home");
        std::fs::create_dir_all(&project_dir).expect("Failed to create project dir");
        std::fs::create_dir_all(&home_dir).expect("Failed to create home dir");
        Self {
            temp_dir,
            project_dir,
            home_dir,
        }
    }

    pub fn config(&self) -> SetupConfig {
        SetupConfig::for_dirs(&self.project_dir, &self.home_dir)
    }

    /// Config whose key generation program is a fake script
    #[cfg(unix)]
    pub fn config_with(&self, keygen: FakeKeygen) -> SetupConfig {
        let mut config = self.config();
        config.keygen_program = self.write_fake_keygen(keygen).to_string_lossy().to_string();
        config
    }

    pub fn write_project_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.project_dir.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn read(&self, path: &Path) -> String {
        std::fs::read_to_string(path).expect("Failed to read file")
    }

    /// Write an executable fake key generation program and return its path
    #[cfg(unix)]
    pub fn write_fake_keygen(&self, keygen: FakeKeygen) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let write_keys = format!(
            r#"out=""
while [ "$#" -gt 0 ]; do
  if [ "$1" = "-f" ]; then out="$2"; shift; fi
  shift
done
printf '%s\n' 'FAKE PRIVATE KEY' > "$out"
printf '%s\n' '{}' > "$out.pub"
"#,
            SAMPLE_RSA_PUBLIC_KEY
        );

        let body = match keygen {
            FakeKeygen::Succeeds => write_keys,
            FakeKeygen::SucceedsWithWarning(warning) => {
                format!("{}echo '{}' >&2\n", write_keys, warning)
            }
            FakeKeygen::Fails(code) => format!("echo 'Saving key failed' >&2\nexit {}\n", code),
        };

        let path = self.temp_dir.path().join("fake-keygen");
        std::fs::write(&path, format!("#!/bin/sh\n{}", body)).expect("Failed to write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod script");
        path
    }
}

/// Whether a real ssh-keygen can be spawned
pub fn real_keygen_available() -> bool {
    std::process::Command::new("ssh-keygen")
        .arg("-?")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok()
}
