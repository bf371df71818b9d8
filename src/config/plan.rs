use crate::config::schema::{InstallerConfig, PackageBackend};
use crate::config::validation::{
    validate_absolute, validate_command_name, validate_venv_dir,
};
use crate::core::error::Result;
use crate::core::absolute_source_dir;
use crate::launcher::LauncherScript;
use std::path::{Path, PathBuf};

/// Per-invocation values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct PlanOverrides {
    pub source_dir: Option<PathBuf>,
    pub venv: Option<String>,
    pub target: Option<PathBuf>,
    pub command: Option<String>,
    pub interpreter: Option<String>,
    pub backend: Option<PackageBackend>,
}

/// Everything one install run needs, with no ambient state left to read.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallPlan {
    pub source_dir: PathBuf,
    pub venv_dir: String,
    pub target: PathBuf,
    pub command: String,
    pub interpreter: String,
    pub backend: PackageBackend,
}

impl InstallPlan {
    /// Merges `overrides` over `config`. A relative source dir is taken
    /// against `cwd`. The result is absolute but symlinks are not resolved,
    /// so the launcher embeds the directory as the operator named it.
    pub fn resolve(overrides: PlanOverrides, config: &InstallerConfig, cwd: &Path) -> Result<Self> {
        let source_dir = match overrides.source_dir {
            Some(dir) => absolute_source_dir(cwd, &dir)?,
            None => absolute_source_dir(cwd, Path::new("."))?,
        };

        let venv_dir = overrides.venv.unwrap_or_else(|| config.python.venv.clone());
        validate_venv_dir(&venv_dir)?;

        let target = overrides
            .target
            .unwrap_or_else(|| PathBuf::from(&config.launcher.target));
        validate_absolute("--target", &target.to_string_lossy())?;

        let command = overrides
            .command
            .unwrap_or_else(|| config.launcher.command.clone());
        validate_command_name(&command)?;

        let interpreter = overrides
            .interpreter
            .unwrap_or_else(|| config.launcher.interpreter.clone());
        validate_absolute("--interpreter", &interpreter)?;

        Ok(Self {
            source_dir,
            venv_dir,
            target,
            command,
            interpreter,
            backend: overrides.backend.unwrap_or(config.python.backend),
        })
    }

    pub fn venv_path(&self) -> PathBuf {
        self.source_dir.join(&self.venv_dir)
    }

    pub fn launcher(&self) -> Result<LauncherScript> {
        LauncherScript::new(
            self.target.clone(),
            self.source_dir.clone(),
            self.venv_dir.clone(),
            self.command.clone(),
            self.interpreter.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::InstallerError;

    #[test]
    fn defaults_come_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let plan =
            InstallPlan::resolve(PlanOverrides::default(), &InstallerConfig::default(), dir.path())
                .unwrap();

        assert_eq!(plan.source_dir, dir.path());
        assert_eq!(plan.target, PathBuf::from("/usr/bin/vaultlocker"));
        assert_eq!(plan.command, "vaultlocker");
        assert_eq!(plan.venv_path(), plan.source_dir.join("venv"));
        assert_eq!(plan.backend, PackageBackend::Pip);
    }

    #[test]
    fn overrides_win_over_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("app")).unwrap();
        let overrides = PlanOverrides {
            source_dir: Some(PathBuf::from("app")),
            venv: Some(".venv".to_string()),
            target: Some(dir.path().join("bin-vaultlocker")),
            backend: Some(PackageBackend::Uv),
            ..Default::default()
        };

        let plan = InstallPlan::resolve(overrides, &InstallerConfig::default(), dir.path()).unwrap();

        assert_eq!(plan.source_dir, dir.path().join("app"));
        assert_eq!(plan.venv_dir, ".venv");
        assert_eq!(plan.target, dir.path().join("bin-vaultlocker"));
        assert_eq!(plan.backend, PackageBackend::Uv);
    }

    #[test]
    fn relative_target_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = PlanOverrides {
            target: Some(PathBuf::from("vaultlocker")),
            ..Default::default()
        };

        let err = InstallPlan::resolve(overrides, &InstallerConfig::default(), dir.path())
            .unwrap_err();
        assert!(err.to_string().contains("--target"));
    }

    #[test]
    fn missing_source_dir_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = PlanOverrides {
            source_dir: Some(dir.path().join("gone")),
            ..Default::default()
        };

        assert!(InstallPlan::resolve(overrides, &InstallerConfig::default(), dir.path()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_source_dir_is_not_resolved() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("releases-v3")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("releases-v3"), dir.path().join("current"))
            .unwrap();
        let overrides = PlanOverrides {
            source_dir: Some(dir.path().join("current")),
            ..Default::default()
        };

        let plan = InstallPlan::resolve(overrides, &InstallerConfig::default(), dir.path()).unwrap();

        assert_eq!(plan.source_dir, dir.path().join("current"));
        let rendered = plan.launcher().unwrap().render();
        let expected = format!("{}/venv/bin/activate", dir.path().join("current").display());
        assert!(rendered.contains(&expected));
        assert!(!rendered.contains("releases-v3"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_source_dir_is_a_config_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let name = OsStr::from_bytes(b"app\xff");
        std::fs::create_dir(dir.path().join(name)).unwrap();

        for (overrides, cwd) in [
            (
                PlanOverrides {
                    source_dir: Some(PathBuf::from(name)),
                    ..Default::default()
                },
                dir.path().to_path_buf(),
            ),
            (PlanOverrides::default(), dir.path().join(name)),
        ] {
            let err = InstallPlan::resolve(overrides, &InstallerConfig::default(), &cwd)
                .unwrap_err();
            assert!(matches!(err, InstallerError::Config(_)), "{:?}", err);
        }
    }
}
