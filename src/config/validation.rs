use crate::config::schema::InstallerConfig;
use crate::core::error::{InstallerError, Result};
use crate::core::is_contained_relative;
use std::path::Path;

pub fn validate_command_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(InstallerError::Config(
            "launcher.command cannot be empty".to_string(),
        ));
    }

    if name.starts_with('-') {
        return Err(InstallerError::Config(
            "launcher.command cannot start with '-'".to_string(),
        ));
    }

    if name.chars().any(|c| c == '/' || c == '\\') {
        return Err(InstallerError::Config(
            "launcher.command must be a bare command name (no path separators)".to_string(),
        ));
    }

    let valid = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-');
    if !valid {
        return Err(InstallerError::Config(
            "launcher.command may only contain ASCII letters/digits and . _ -".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_absolute(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(InstallerError::Config(format!("{} cannot be empty", key)));
    }
    if !Path::new(value).is_absolute() {
        return Err(InstallerError::Config(format!(
            "{} must be an absolute path, got '{}'",
            key, value
        )));
    }
    if value.contains('\n') {
        return Err(InstallerError::Config(format!(
            "{} cannot contain a newline",
            key
        )));
    }
    Ok(())
}

pub fn validate_venv_dir(venv: &str) -> Result<()> {
    if !is_contained_relative(venv) {
        return Err(InstallerError::Config(format!(
            "python.venv must be a relative path inside the project, got '{}'",
            venv
        )));
    }
    Ok(())
}

pub fn validate_config(config: &InstallerConfig) -> Result<()> {
    validate_absolute("launcher.target", &config.launcher.target)?;
    validate_absolute("launcher.interpreter", &config.launcher.interpreter)?;
    validate_command_name(&config.launcher.command)?;
    validate_venv_dir(&config.python.venv)?;
    Ok(())
}
