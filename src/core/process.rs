use crate::core::error::{InstallerError, Result};
use std::process::Output;
use tokio::process::Command;

pub struct ProcessExecutor;

impl ProcessExecutor {
    /// Runs a prepared command to completion and collects its output.
    /// `label` names the program in spawn errors.
    pub async fn execute(mut command: Command, label: &str) -> Result<Output> {
        tracing::debug!("running {}", label);

        let output = command
            .output()
            .await
            .map_err(|e| InstallerError::CommandFailed(format!("{}: {}", label, e)))?;

        tracing::debug!("{} exited with {}", label, output.status);
        Ok(output)
    }

    pub fn check_command_exists(cmd: &str) -> bool {
        std::process::Command::new("which")
            .arg(cmd)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}
