use serde::{Deserialize, Serialize};

pub const DEFAULT_TARGET: &str = "/usr/bin/vaultlocker";
pub const DEFAULT_COMMAND: &str = "vaultlocker";
pub const DEFAULT_INTERPRETER: &str = "/bin/sh";
pub const DEFAULT_VENV_DIR: &str = "venv";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct InstallerConfig {
    #[serde(default)]
    pub launcher: LauncherConfig,
    #[serde(default)]
    pub python: PythonConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LauncherConfig {
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default = "default_command")]
    pub command: String,
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            command: default_command(),
            interpreter: default_interpreter(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PythonConfig {
    #[serde(default = "default_venv")]
    pub venv: String,
    #[serde(default)]
    pub backend: PackageBackend,
}

impl Default for PythonConfig {
    fn default() -> Self {
        Self {
            venv: default_venv(),
            backend: PackageBackend::default(),
        }
    }
}

/// Which package manager performs the editable install.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PackageBackend {
    /// `pip` from inside the virtual environment
    #[default]
    Pip,
    /// `uv pip` pointed at the environment's interpreter
    Uv,
}

impl PackageBackend {
    pub fn to_str(&self) -> &str {
        match self {
            PackageBackend::Pip => "pip",
            PackageBackend::Uv => "uv",
        }
    }
}

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

fn default_command() -> String {
    DEFAULT_COMMAND.to_string()
}

fn default_interpreter() -> String {
    DEFAULT_INTERPRETER.to_string()
}

fn default_venv() -> String {
    DEFAULT_VENV_DIR.to_string()
}
