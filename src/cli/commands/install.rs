use crate::cli::InstallArgs;
use crate::config::{ConfigManager, InstallPlan};
use crate::core::error::Result;
use crate::core::logical_current_dir;
use crate::launcher::WriteOutcome;
use crate::python::{PackageInstaller, Venv};
use colored::Colorize;

pub async fn execute(args: InstallArgs) -> Result<()> {
    let config = ConfigManager::new()?.load().await?;
    let current_dir = logical_current_dir()?;
    let plan = InstallPlan::resolve(args.launcher.into(), &config, &current_dir)?;

    println!(
        "{} Installing {} from {}",
        "⚙".blue().bold(),
        plan.command.cyan(),
        plan.source_dir.display().to_string().yellow()
    );

    let outcome = run(&plan, args.skip_package).await?;

    let verb = match outcome {
        WriteOutcome::Created => "created",
        WriteOutcome::Unchanged => "unchanged",
        WriteOutcome::Replaced | WriteOutcome::ReplacedForeign => "replaced",
    };
    println!(
        "{} Launcher {} at {}",
        "✓".green().bold(),
        verb,
        plan.target.display().to_string().yellow()
    );
    println!("  Run {} to use it", plan.command.cyan());

    Ok(())
}

/// The install sequence. Stops at the first failing step; the launcher is
/// only touched once the environment check and package install succeed.
pub async fn run(plan: &InstallPlan, skip_package: bool) -> Result<WriteOutcome> {
    let venv = Venv::open(plan.venv_path())?;
    tracing::debug!("using virtual environment {}", venv.path().display());

    if skip_package {
        println!(
            "{} Skipping package installation",
            "ℹ".blue().bold()
        );
    } else {
        PackageInstaller::new(venv, plan.backend)
            .install_editable(&plan.source_dir)
            .await?;
        println!(
            "{} Installed {} in editable mode",
            "✓".green().bold(),
            plan.source_dir.display()
        );
    }

    let launcher = plan.launcher()?;
    let outcome = launcher.install().await?;
    tracing::info!(
        "launcher {} -> {}",
        launcher.target().display(),
        launcher.activate_path()
    );

    Ok(outcome)
}
