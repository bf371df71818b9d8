use crate::config::schema::InstallerConfig;
use crate::config::validate_config;
use crate::core::error::Result;
use crate::core::ensure_dir_exists;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tokio::fs;

const CONFIG_FILE: &str = "config.toml";
pub const CONFIG_PATH_ENV: &str = "VAULTLOCKER_INSTALLER_CONFIG";

pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Resolves the config location from `VAULTLOCKER_INSTALLER_CONFIG`,
    /// falling back to the platform config directory.
    pub fn new() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return Ok(Self::at(PathBuf::from(path)));
            }
        }

        Ok(Self::at(Self::get_config_dir().join(CONFIG_FILE)))
    }

    pub fn at(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    fn get_config_dir() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("com", "vaultlocker", "vaultlocker-installer")
        {
            proj_dirs.config_dir().to_path_buf()
        } else {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".vaultlocker-installer")
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    pub async fn load(&self) -> Result<InstallerConfig> {
        if !self.exists() {
            tracing::debug!(
                "no config at {}, using defaults",
                self.config_path.display()
            );
            return Ok(InstallerConfig::default());
        }

        let content = fs::read_to_string(&self.config_path).await?;
        let config: InstallerConfig = toml::from_str(&content)?;
        validate_config(&config)?;
        Ok(config)
    }

    pub async fn save(&self, config: &InstallerConfig) -> Result<()> {
        validate_config(config)?;
        if let Some(parent) = self.config_path.parent() {
            ensure_dir_exists(parent).await?;
        }
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PackageBackend;

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = ConfigManager::at(dir.path().join("config.toml"));

        let config = mgr.load().await.unwrap();
        assert_eq!(config, InstallerConfig::default());
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = ConfigManager::at(dir.path().join("nested").join("config.toml"));

        let mut config = InstallerConfig::default();
        config.python.backend = PackageBackend::Uv;
        config.launcher.target = "/usr/local/bin/vaultlocker".to_string();
        mgr.save(&config).await.unwrap();

        assert_eq!(mgr.load().await.unwrap(), config);
    }

    #[tokio::test]
    async fn invalid_values_fail_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = ConfigManager::at(dir.path().join("config.toml"));

        let toml = r#"
[launcher]
target = "relative/vaultlocker"
"#;
        tokio::fs::write(mgr.config_path(), toml).await.unwrap();

        let err = mgr.load().await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("launcher.target"), "unexpected error: {}", msg);
    }
}
