use crate::cli::LauncherArgs;
use crate::config::{ConfigManager, InstallPlan};
use crate::core::error::Result;
use crate::core::logical_current_dir;

pub async fn execute(args: LauncherArgs) -> Result<()> {
    let config = ConfigManager::new()?.load().await?;
    let current_dir = logical_current_dir()?;
    let plan = InstallPlan::resolve(args.into(), &config, &current_dir)?;

    print!("{}", plan.launcher()?.render());
    Ok(())
}
