use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Virtual environment not found at {}", .0.display())]
    EnvironmentMissing(PathBuf),

    #[error("Package installation failed: {0}")]
    Installation(String),

    #[error("Permission denied: {}: {source}", .path.display())]
    Permission {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    #[error("Launcher not found: {}", .0.display())]
    LauncherNotFound(PathBuf),

    #[error("Launcher at {} needs attention", .0.display())]
    UnhealthyLauncher(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSerialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InstallerError {
    /// Wraps an I/O error on `path`, promoting permission failures to
    /// [`InstallerError::Permission`].
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            InstallerError::Permission {
                path: path.into(),
                source: err,
            }
        } else {
            InstallerError::Io(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, InstallerError>;
