//! End-to-end runs of the setup pipeline against temporary directories

mod common;

use common::{MockProject, SAMPLE_RSA_PUBLIC_KEY};
use sshy_lib::commands::{run_setup, SetupStage, SetupStep};
use sshy_lib::models::SshyError;
use sshy_lib::services::IgnoreFileUpdate;
use sshy_lib::utils::SshConfigParser;

#[cfg(unix)]
use common::FakeKeygen;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

#[cfg(unix)]
#[tokio::test]
async fn test_setup_in_empty_project() {
    let project = MockProject::new();
    let config = project.config_with(FakeKeygen::Succeeds);

    let mut input: &[u8] = b"alice@example.com\n";
    let mut output = Vec::new();
    let report = run_setup(&config, &mut input, &mut output).await.unwrap();

    assert_eq!(report.stage, SetupStage::Done);
    assert_eq!(report.ignore_update, IgnoreFileUpdate::Created);
    assert_eq!(project.read(&config.ignore_file_path()), ".sshy\n");

    assert!(config.private_key_path().exists());
    assert!(config.public_key_path().exists());

    let printed = String::from_utf8(output).unwrap();
    assert!(printed.contains(SAMPLE_RSA_PUBLIC_KEY));
    assert!(printed.contains("SHA256:7MRM8FtD6yALtonb/05Xr6UmxiDPVvCXWrPP5E9oM/I"));
    assert!(printed.contains("Setup completed successfully!"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_setup_keeps_existing_ignore_content() {
    let project = MockProject::new();
    let config = project.config_with(FakeKeygen::Succeeds);
    project.write_project_file(".gitignore", "target/\n");

    let mut input: &[u8] = b"alice@example.com\n";
    let report = run_setup(&config, &mut input, &mut Vec::new())
        .await
        .unwrap();

    assert_eq!(report.ignore_update, IgnoreFileUpdate::Appended);
    assert_eq!(project.read(&config.ignore_file_path()), "target/\n\n.sshy\n");
}

#[cfg(unix)]
#[tokio::test]
async fn test_setup_appends_host_block() {
    let project = MockProject::new();
    let config = project.config_with(FakeKeygen::Succeeds);

    let mut input: &[u8] = b"\nalice@example.com\n";
    let report = run_setup(&config, &mut input, &mut Vec::new())
        .await
        .unwrap();

    let identity = std::fs::canonicalize(config.private_key_path()).unwrap();
    assert_eq!(report.key.private_key_path, identity);
    assert!(report.ssh_config_created);

    let content = project.read(&config.ssh_config_path);
    assert_eq!(
        content,
        format!(
            "Host example.com\n    User alice\n    Hostname example.com\n    PreferredAuthentications publickey\n    IdentityFile {}\n\n",
            identity.display()
        )
    );

    let hosts = SshConfigParser::parse(&content);
    let host = SshConfigParser::find_host(&hosts, "example.com").unwrap();
    assert_eq!(host.user.as_deref(), Some("alice"));
    assert_eq!(host.hostname.as_deref(), Some("example.com"));
    assert_eq!(host.identity_file.as_deref(), Some(identity.as_path()));
}

#[cfg(unix)]
#[tokio::test]
async fn test_created_files_are_owner_only() {
    let project = MockProject::new();
    let config = project.config_with(FakeKeygen::Succeeds);

    let mut input: &[u8] = b"deploy@10.0.0.7\n";
    run_setup(&config, &mut input, &mut Vec::new()).await.unwrap();

    let config_mode = std::fs::metadata(&config.ssh_config_path)
        .unwrap()
        .permissions()
        .mode()
        & 0o777;
    assert_eq!(config_mode, 0o600);

    let key_mode = std::fs::metadata(config.private_key_path())
        .unwrap()
        .permissions()
        .mode()
        & 0o777;
    assert_eq!(key_mode, 0o600);
}

#[cfg(unix)]
#[tokio::test]
async fn test_keygen_failure_stops_before_config() {
    let project = MockProject::new();
    let config = project.config_with(FakeKeygen::Fails(1));

    let mut input: &[u8] = b"alice@example.com\n";
    let failure = run_setup(&config, &mut input, &mut Vec::new())
        .await
        .unwrap_err();

    assert_eq!(failure.step, SetupStep::GenerateKey);
    assert_eq!(
        failure.error,
        SshyError::KeygenFailed {
            status: "exit code 1".to_string(),
            stderr: "Saving key failed".to_string(),
        }
    );
    assert!(!config.ssh_config_path.exists());
    assert!(!config.public_key_path().exists());
    assert!(!config.key_dir().exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_rerun_after_keygen_failure_succeeds() {
    let project = MockProject::new();
    let failing = project.config_with(FakeKeygen::Fails(1));

    let mut input: &[u8] = b"alice@example.com\n";
    run_setup(&failing, &mut input, &mut Vec::new())
        .await
        .unwrap_err();

    let config = project.config_with(FakeKeygen::Succeeds);
    let mut input: &[u8] = b"alice@example.com\n";
    let report = run_setup(&config, &mut input, &mut Vec::new())
        .await
        .unwrap();

    assert_eq!(report.stage, SetupStage::Done);
    assert_eq!(report.ignore_update, IgnoreFileUpdate::AlreadyPresent);
    assert!(config.private_key_path().exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_project_path_with_spaces() {
    let project = MockProject::named("my project");
    let config = project.config_with(FakeKeygen::Succeeds);

    let mut input: &[u8] = b"alice@example.com\n";
    run_setup(&config, &mut input, &mut Vec::new()).await.unwrap();

    let identity = std::fs::canonicalize(config.private_key_path()).unwrap();
    let content = project.read(&config.ssh_config_path);
    assert!(content.contains(&format!("    IdentityFile \"{}\"\n", identity.display())));

    let hosts = SshConfigParser::parse(&content);
    let host = SshConfigParser::find_host(&hosts, "example.com").unwrap();
    assert_eq!(host.identity_file.as_deref(), Some(identity.as_path()));
}

#[cfg(unix)]
#[tokio::test]
async fn test_keygen_stderr_is_only_a_warning() {
    let project = MockProject::new();
    let config = project.config_with(FakeKeygen::SucceedsWithWarning("random art skipped"));

    let mut input: &[u8] = b"alice@example.com\n";
    let mut output = Vec::new();
    let report = run_setup(&config, &mut input, &mut output).await.unwrap();

    assert_eq!(report.key.diagnostics.as_deref(), Some("random art skipped"));
    assert!(String::from_utf8(output).unwrap().contains("random art skipped"));
    assert!(config.ssh_config_path.exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_rerun_aborts_on_existing_key_folder() {
    let project = MockProject::new();
    let config = project.config_with(FakeKeygen::Succeeds);

    let mut input: &[u8] = b"alice@example.com\n";
    run_setup(&config, &mut input, &mut Vec::new()).await.unwrap();
    let config_after_first = project.read(&config.ssh_config_path);

    let mut input: &[u8] = b"alice@example.com\n";
    let failure = run_setup(&config, &mut input, &mut Vec::new())
        .await
        .unwrap_err();

    assert_eq!(failure.step, SetupStep::GenerateKey);
    assert_eq!(failure.error.error_type(), "KeyFolderExists");
    assert_eq!(project.read(&config.ssh_config_path), config_after_first);

    let ignore = project.read(&config.ignore_file_path());
    assert_eq!(ignore.matches(".sshy").count(), 1);
}

#[cfg(unix)]
#[tokio::test]
async fn test_closed_input_leaves_config_untouched() {
    let project = MockProject::new();
    let config = project.config_with(FakeKeygen::Succeeds);

    let mut input: &[u8] = b"";
    let failure = run_setup(&config, &mut input, &mut Vec::new())
        .await
        .unwrap_err();

    assert_eq!(failure.step, SetupStep::WriteConfig);
    assert_eq!(failure.error.error_type(), "PromptAborted");
    assert!(!config.ssh_config_path.exists());
}

#[tokio::test]
async fn test_missing_keygen_program() {
    let project = MockProject::new();
    let mut config = project.config();
    config.keygen_program = project
        .temp_dir
        .path()
        .join("not-installed")
        .to_string_lossy()
        .to_string();

    let mut input: &[u8] = b"alice@example.com\n";
    let failure = run_setup(&config, &mut input, &mut Vec::new())
        .await
        .unwrap_err();

    assert_eq!(failure.error.error_type(), "KeygenUnavailable");
    assert!(failure.to_string().contains("generating the key"));
    assert!(!config.key_dir().exists());
}

#[tokio::test]
async fn test_real_ssh_keygen() {
    if !common::real_keygen_available() {
        eprintln!("ssh-keygen not installed, skipping");
        return;
    }

    let project = MockProject::new();
    let config = project.config();

    let mut input: &[u8] = b"git@git.example.org\n";
    let report = run_setup(&config, &mut input, &mut Vec::new())
        .await
        .unwrap();

    assert_eq!(report.public_key.bit_size, Some(4096));
    assert_eq!(report.public_key.key_type.to_string(), "rsa");
    assert!(report
        .public_key
        .fingerprint
        .as_deref()
        .unwrap()
        .starts_with("SHA256:"));
    assert_eq!(report.target.user, "git");
}
