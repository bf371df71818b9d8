use crate::config::{ConfigManager, InstallerConfig};
use crate::core::error::{InstallerError, Result};
use colored::Colorize;

pub async fn execute(init: bool, force: bool) -> Result<()> {
    let manager = ConfigManager::new()?;

    if init {
        init_config(&manager, force).await?;
        println!(
            "{} Wrote default config to {}",
            "✓".green().bold(),
            manager.config_path().display().to_string().yellow()
        );
        return Ok(());
    }

    let config = manager.load().await?;
    let source = if manager.exists() {
        manager.config_path().display().to_string()
    } else {
        format!("{} (not present, defaults)", manager.config_path().display())
    };
    println!("# {}", source);
    print!("{}", toml::to_string_pretty(&config)?);

    Ok(())
}

/// Writes the default config, refusing to replace an existing file unless
/// `force` is set.
pub async fn init_config(manager: &ConfigManager, force: bool) -> Result<()> {
    if manager.exists() && !force {
        return Err(InstallerError::Config(format!(
            "{} already exists. Use --force to overwrite it.",
            manager.config_path().display()
        )));
    }

    manager.save(&InstallerConfig::default()).await
}
