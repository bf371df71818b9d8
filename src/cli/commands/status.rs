use crate::config::ConfigManager;
use crate::core::error::{InstallerError, Result};
use crate::core::{compute_sha256, file_mode};
use crate::launcher::{parse_launcher, LAUNCHER_MODE};
use crate::python::Venv;
use chrono::{DateTime, Local};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct LauncherStatus {
    pub target: PathBuf,
    pub recognized: bool,
    pub command: Option<String>,
    pub venv_path: Option<PathBuf>,
    pub venv_exists: bool,
    pub mode: String,
    pub mode_ok: bool,
    pub sha256: String,
    pub modified: Option<String>,
}

impl LauncherStatus {
    pub fn healthy(&self) -> bool {
        self.recognized && self.venv_exists && self.mode_ok
    }

    pub fn ensure_healthy(&self) -> Result<()> {
        if self.healthy() {
            Ok(())
        } else {
            Err(InstallerError::UnhealthyLauncher(self.target.clone()))
        }
    }
}

pub async fn execute(target: Option<PathBuf>, json: bool) -> Result<()> {
    let target = match target {
        Some(target) => target,
        None => PathBuf::from(ConfigManager::new()?.load().await?.launcher.target),
    };

    let status = inspect(&target).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        print_report(&status);
    }

    status.ensure_healthy()
}

/// Reads back an installed launcher. A missing target is an error; a
/// foreign or stale launcher is reported through the returned status.
pub async fn inspect(target: &Path) -> Result<LauncherStatus> {
    let content = match tokio::fs::read(target).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(InstallerError::LauncherNotFound(target.to_path_buf()))
        }
        Err(e) => return Err(InstallerError::from_io(target, e)),
    };

    let parsed = std::str::from_utf8(&content).ok().and_then(parse_launcher);
    let mode = file_mode(target).await?;
    let modified = tokio::fs::metadata(target)
        .await?
        .modified()
        .ok()
        .map(|t| DateTime::<Local>::from(t).to_rfc3339());

    let venv_exists = parsed
        .as_ref()
        .is_some_and(|p| Venv::new(p.venv_path.clone()).is_valid());

    Ok(LauncherStatus {
        target: target.to_path_buf(),
        recognized: parsed.is_some(),
        command: parsed.as_ref().map(|p| p.command.clone()),
        venv_path: parsed.map(|p| p.venv_path),
        venv_exists,
        mode: format!("{:04o}", mode),
        mode_ok: cfg!(not(unix)) || mode == LAUNCHER_MODE,
        sha256: compute_sha256(target).await?,
        modified,
    })
}

fn print_report(status: &LauncherStatus) {
    println!("{}", "Launcher status".bold());
    println!("  Path: {}", status.target.display().to_string().yellow());

    if !status.recognized {
        println!(
            "  {} Not generated by vaultlocker-installer (hand-edited or foreign file)",
            "⚠".yellow().bold()
        );
    }

    if let Some(command) = &status.command {
        println!("  Command: {}", command.cyan());
    }

    if let Some(venv) = &status.venv_path {
        if status.venv_exists {
            println!("  Environment: {} {}", venv.display(), "✓".green());
        } else {
            println!(
                "  Environment: {} {}",
                venv.display(),
                "✗ missing (source directory moved or deleted?)".red()
            );
        }
    }

    if status.mode_ok {
        println!("  Mode: {} {}", status.mode, "✓".green());
    } else {
        println!(
            "  Mode: {} {}",
            status.mode,
            format!("✗ expected {:04o}", LAUNCHER_MODE).red()
        );
    }

    println!("  SHA-256: {}", status.sha256);
    if let Some(modified) = &status.modified {
        println!("  Modified: {}", modified);
    }

    println!();
    if status.healthy() {
        println!("{}", "Launcher is healthy.".green().bold());
    } else {
        println!(
            "{}",
            "Launcher needs attention. Re-run vaultlocker-installer from the project directory."
                .yellow()
                .bold()
        );
    }
}
