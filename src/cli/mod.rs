pub mod commands;

use crate::config::{PackageBackend, PlanOverrides};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Backend {
    Pip,
    Uv,
}

impl From<Backend> for PackageBackend {
    fn from(value: Backend) -> Self {
        match value {
            Backend::Pip => PackageBackend::Pip,
            Backend::Uv => PackageBackend::Uv,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "vaultlocker-installer",
    version,
    about = "Install vaultlocker into its virtual environment and expose it as a system command",
    long_about = None,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    // used when no subcommand is given
    #[command(flatten)]
    pub install: InstallArgs,
}

#[derive(Args, Clone, Debug, Default)]
pub struct LauncherArgs {
    /// Project directory to install from (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Virtual environment directory, relative to the project (default: venv)
    #[arg(long, value_name = "DIR")]
    pub venv: Option<String>,

    /// Where to write the launcher (default: /usr/bin/vaultlocker)
    #[arg(long, value_name = "PATH")]
    pub target: Option<PathBuf>,

    /// Command the launcher forwards to (default: vaultlocker)
    #[arg(long = "command", value_name = "NAME")]
    pub exec_command: Option<String>,

    /// Interpreter written into the launcher's shebang (default: /bin/sh)
    #[arg(long, value_name = "PATH")]
    pub interpreter: Option<String>,

    /// Package manager used for the editable install (default: pip)
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,
}

impl From<LauncherArgs> for PlanOverrides {
    fn from(args: LauncherArgs) -> Self {
        Self {
            source_dir: args.source_dir,
            venv: args.venv,
            target: args.target,
            command: args.exec_command,
            interpreter: args.interpreter,
            backend: args.backend.map(Into::into),
        }
    }
}

#[derive(Args, Clone, Debug, Default)]
pub struct InstallArgs {
    #[command(flatten)]
    pub launcher: LauncherArgs,

    /// Only regenerate the launcher; do not run the package manager
    #[arg(long)]
    pub skip_package: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install the project into its venv and write the launcher (default)
    Install(InstallArgs),

    /// Print the launcher that would be written, without writing anything
    Show(LauncherArgs),

    /// Inspect an installed launcher
    Status {
        /// Launcher path (default: from config, or /usr/bin/vaultlocker)
        #[arg(long, value_name = "PATH")]
        target: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or initialize the installer config file
    Config {
        /// Write a config file with default values
        #[arg(long)]
        init: bool,

        /// Overwrite an existing config file (with --init)
        #[arg(long, requires = "init")]
        force: bool,
    },
}

pub async fn run(cli: Cli) -> crate::core::error::Result<()> {
    match cli.subcommand {
        None => commands::install::execute(cli.install).await,

        Some(Commands::Install(args)) => commands::install::execute(args).await,

        Some(Commands::Show(args)) => commands::show::execute(args).await,

        Some(Commands::Status { target, json }) => commands::status::execute(target, json).await,

        Some(Commands::Config { init, force }) => commands::config::execute(init, force).await,
    }
}
