use crate::config::PackageBackend;
use crate::core::error::{InstallerError, Result};
use crate::core::ProcessExecutor;
use crate::python::Venv;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

/// Files whose presence marks a directory as an installable project.
pub const PACKAGE_METADATA_FILES: &[&str] = &["pyproject.toml", "setup.py", "setup.cfg"];

/// Runs the external package manager against a virtual environment.
pub struct PackageInstaller {
    venv: Venv,
    backend: PackageBackend,
}

impl PackageInstaller {
    pub fn new(venv: Venv, backend: PackageBackend) -> Self {
        Self { venv, backend }
    }

    /// Returns the first package metadata file found in `source_dir`.
    pub fn find_metadata(source_dir: &Path) -> Result<&'static str> {
        PACKAGE_METADATA_FILES
            .iter()
            .copied()
            .find(|name| source_dir.join(name).is_file())
            .ok_or_else(|| {
                InstallerError::Installation(format!(
                    "No package metadata in {} (expected one of: {})",
                    source_dir.display(),
                    PACKAGE_METADATA_FILES.join(", ")
                ))
            })
    }

    /// The package-manager invocation for an editable install, with the
    /// environment activated for that child only.
    fn editable_command(&self, source_dir: &Path) -> Command {
        let mut command = match self.backend {
            PackageBackend::Pip => {
                let mut command = Command::new(self.venv.executable("pip"));
                command.args(["install", "-e"]);
                command
            }
            PackageBackend::Uv => {
                let mut command = Command::new("uv");
                command.args(["pip", "install", "--python"]);
                command.arg(self.venv.python());
                command.arg("-e");
                command
            }
        };
        command.arg(source_dir);

        self.venv.activate(&mut command);
        command.current_dir(source_dir);
        command
    }

    fn check_backend(&self) -> Result<()> {
        match self.backend {
            PackageBackend::Pip => {
                let pip = self.venv.executable("pip");
                if !pip.exists() {
                    return Err(InstallerError::Installation(format!(
                        "pip not found in virtual environment ({})",
                        pip.display()
                    )));
                }
            }
            PackageBackend::Uv => {
                if !ProcessExecutor::check_command_exists("uv") {
                    return Err(InstallerError::Installation(
                        "uv is not installed. Please install it first: https://github.com/astral-sh/uv"
                            .to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Installs `source_dir` into the environment in editable mode.
    pub async fn install_editable(&self, source_dir: &Path) -> Result<()> {
        let metadata = Self::find_metadata(source_dir)?;
        tracing::debug!("found {} in {}", metadata, source_dir.display());

        self.check_backend()?;
        let command = self.editable_command(source_dir);

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed}]")
                .expect("Invalid spinner template"),
        );
        spinner.set_message(format!(
            "Installing {} in editable mode with {}",
            source_dir.display(),
            self.backend.to_str()
        ));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let output = ProcessExecutor::execute(command, self.backend.to_str()).await;
        spinner.finish_and_clear();
        let output = output?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);

            eprintln!("\n{}", "Installation output:".yellow().bold());
            if !stdout.is_empty() {
                eprintln!("{}", stdout);
            }
            if !stderr.is_empty() {
                eprintln!("{}", stderr);
            }

            return Err(InstallerError::Installation(format!(
                "{} exited with {}. See output above for details.",
                self.backend.to_str(),
                output.status
            )));
        }

        Ok(())
    }
}
