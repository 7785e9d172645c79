use crate::models::{HostTarget, PublicKeyInfo, SetupConfig, SshyError, SshResult};
use crate::services::{
    ConfigWriter, GeneratedKey, IgnoreFileUpdate, IgnoreFileUpdater, KeyGenerator, KeyPresenter,
};
use colored::Colorize;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;
use tokio::io::AsyncBufRead;

const SEPARATOR: &str = "====================================";

/// Progress of `sshy setup`; each stage is reached only after the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SetupStage {
    Start,
    IgnoreUpdated,
    KeyGenerated,
    KeyDisplayed,
    ConfigUpdated,
    Done,
}

impl fmt::Display for SetupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SetupStage::Start => "start",
            SetupStage::IgnoreUpdated => "ignore-updated",
            SetupStage::KeyGenerated => "key-generated",
            SetupStage::KeyDisplayed => "key-displayed",
            SetupStage::ConfigUpdated => "config-updated",
            SetupStage::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// One unit of work in `sshy setup`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SetupStep {
    Configure,
    UpdateIgnoreFile,
    GenerateKey,
    PresentKey,
    WriteConfig,
    Finish,
}

impl SetupStep {
    /// Stage the run is in once this step succeeds
    pub fn completes(&self) -> SetupStage {
        match self {
            SetupStep::Configure => SetupStage::Start,
            SetupStep::UpdateIgnoreFile => SetupStage::IgnoreUpdated,
            SetupStep::GenerateKey => SetupStage::KeyGenerated,
            SetupStep::PresentKey => SetupStage::KeyDisplayed,
            SetupStep::WriteConfig => SetupStage::ConfigUpdated,
            SetupStep::Finish => SetupStage::Done,
        }
    }
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SetupStep::Configure => "resolving the configuration",
            SetupStep::UpdateIgnoreFile => "updating the ignore file",
            SetupStep::GenerateKey => "generating the key",
            SetupStep::PresentKey => "presenting the public key",
            SetupStep::WriteConfig => "writing the SSH config",
            SetupStep::Finish => "finishing",
        };
        write!(f, "{}", name)
    }
}

/// A setup run that stopped early
#[derive(Error, Debug, Clone, PartialEq)]
#[error("setup failed while {step}: {error}")]
pub struct SetupFailure {
    /// The step that failed; no later step ran
    pub step: SetupStep,
    #[source]
    pub error: SshyError,
}

impl SetupFailure {
    pub fn new(step: SetupStep, error: SshyError) -> Self {
        Self { step, error }
    }
}

/// Everything a completed setup produced
#[derive(Debug, Clone)]
pub struct SetupReport {
    pub stage: SetupStage,
    pub ignore_update: IgnoreFileUpdate,
    pub key: GeneratedKey,
    pub public_key: PublicKeyInfo,
    pub target: HostTarget,
    pub ssh_config_path: PathBuf,
    pub ssh_config_created: bool,
}

/// Run the four setup steps in order, stopping at the first failure
pub async fn run_setup<R, W>(
    config: &SetupConfig,
    input: &mut R,
    output: &mut W,
) -> Result<SetupReport, SetupFailure>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let fail = |step: SetupStep| move |error: SshyError| SetupFailure::new(step, error);

    let ignore_update = update_ignore_file(config, output)
        .await
        .map_err(fail(SetupStep::UpdateIgnoreFile))?;

    let key = generate_key(config, output)
        .await
        .map_err(fail(SetupStep::GenerateKey))?;

    let public_key = present_key(config, output)
        .await
        .map_err(fail(SetupStep::PresentKey))?;

    let (target, ssh_config_created) = write_config(config, input, output)
        .await
        .map_err(fail(SetupStep::WriteConfig))?;

    writeln!(output, "{}", "Setup completed successfully!".green())
        .map_err(|e| fail(SetupStep::Finish)(e.into()))?;

    Ok(SetupReport {
        stage: SetupStage::Done,
        ignore_update,
        key,
        public_key,
        target,
        ssh_config_path: config.ssh_config_path.clone(),
        ssh_config_created,
    })
}

async fn update_ignore_file<W: Write>(
    config: &SetupConfig,
    output: &mut W,
) -> SshResult<IgnoreFileUpdate> {
    let update = IgnoreFileUpdater::new(config).ensure_entry().await?;
    match update {
        IgnoreFileUpdate::Created => {
            writeln!(output, "✅ {} has been created!", config.ignore_file_name)?
        }
        IgnoreFileUpdate::Appended => {
            writeln!(output, "✅ {} has been updated!", config.ignore_file_name)?
        }
        IgnoreFileUpdate::AlreadyPresent => writeln!(
            output,
            "{}",
            format!(
                "✅ {} already ignores {}",
                config.ignore_file_name, config.key_folder
            )
            .dimmed()
        )?,
    }
    Ok(update)
}

async fn generate_key<W: Write>(config: &SetupConfig, output: &mut W) -> SshResult<GeneratedKey> {
    let key = KeyGenerator::new(config).generate().await?;
    if let Some(diagnostics) = &key.diagnostics {
        writeln!(output, "{}", format!("⚠️ stderr: {}", diagnostics).yellow())?;
    }
    writeln!(
        output,
        "{} {}",
        "✅ File created at".green(),
        key.private_key_path.display().to_string().bright_white()
    )?;
    Ok(key)
}

async fn present_key<W: Write>(config: &SetupConfig, output: &mut W) -> SshResult<PublicKeyInfo> {
    let info = KeyPresenter::new(config).present().await?;

    writeln!(output, "{}", SEPARATOR.green())?;
    writeln!(output, "{}", "SSH Key:".green())?;
    writeln!(output, "{}", info.content.yellow())?;
    if let Some(fingerprint) = &info.fingerprint {
        let size = info
            .bit_size
            .map(|bits| format!(" {}", bits))
            .unwrap_or_default();
        writeln!(
            output,
            "{}",
            format!("{} ({}{})", fingerprint, info.key_type.to_string().to_uppercase(), size)
                .dimmed()
        )?;
    }
    writeln!(output, "{}", SEPARATOR.green())?;

    Ok(info)
}

async fn write_config<R, W>(
    config: &SetupConfig,
    input: &mut R,
    output: &mut W,
) -> SshResult<(HostTarget, bool)>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let writer = ConfigWriter::new(config);
    let identity_file = writer.identity_file().await?;
    let target = writer.prompt_host_target(input, output).await?;

    let created = writer.ensure_config_file().await?;
    if created {
        writeln!(
            output,
            "✅ Created {}",
            writer.config_path().display().to_string().bright_white()
        )?;
    }

    writer.append_host_block(&target, &identity_file).await?;
    writeln!(output, "✅ SSH Config has been updated!")?;

    Ok((target, created))
}
