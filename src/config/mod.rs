pub mod global;
pub mod plan;
pub mod schema;
pub mod validation;

pub use global::{ConfigManager, CONFIG_PATH_ENV};
pub use plan::{InstallPlan, PlanOverrides};
pub use schema::{
    InstallerConfig, LauncherConfig, PackageBackend, PythonConfig, DEFAULT_COMMAND,
    DEFAULT_INTERPRETER, DEFAULT_TARGET, DEFAULT_VENV_DIR,
};
pub use validation::{
    validate_absolute, validate_command_name, validate_config, validate_venv_dir,
};
