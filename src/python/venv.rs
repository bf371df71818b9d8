use crate::core::error::{InstallerError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// A pre-existing virtual environment on disk.
#[derive(Debug, Clone)]
pub struct Venv {
    path: PathBuf,
}

impl Venv {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Opens the environment at `path`, failing with
    /// [`InstallerError::EnvironmentMissing`] unless it looks like a venv.
    pub fn open(path: PathBuf) -> Result<Self> {
        let venv = Self::new(path);
        if !venv.is_valid() {
            return Err(InstallerError::EnvironmentMissing(venv.path));
        }
        Ok(venv)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    pub fn is_valid(&self) -> bool {
        self.exists()
            && (self.activate_script().is_file() || self.path.join("pyvenv.cfg").is_file())
    }

    pub fn bin_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.path.join("Scripts")
        } else {
            self.path.join("bin")
        }
    }

    pub fn activate_script(&self) -> PathBuf {
        self.bin_dir().join("activate")
    }

    pub fn executable(&self, command: &str) -> PathBuf {
        let bin_dir = self.bin_dir();
        if cfg!(windows) {
            bin_dir.join(format!("{}.exe", command))
        } else {
            bin_dir.join(command)
        }
    }

    pub fn python(&self) -> PathBuf {
        self.executable("python")
    }

    /// `PATH` with this environment's bin directory in front.
    pub fn activated_path(&self) -> OsString {
        let mut paths = vec![self.bin_dir()];
        if let Some(original) = std::env::var_os("PATH") {
            paths.extend(std::env::split_paths(&original));
        }
        std::env::join_paths(paths).unwrap_or_else(|_| self.bin_dir().into_os_string())
    }

    /// Activates the environment for one child process only, the way
    /// `bin/activate` would for a shell.
    pub fn activate(&self, command: &mut Command) {
        command
            .env("VIRTUAL_ENV", &self.path)
            .env("PATH", self.activated_path())
            .env_remove("PYTHONHOME");
    }
}
