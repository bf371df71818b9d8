use crate::core::error::{InstallerError, Result};
use std::path::{Component, Path, PathBuf};

/// Folds `.` and `..` out of an absolute path without touching the
/// filesystem, so symlinked components stay as written.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// The directory the shell would report as `$(pwd)`: `PWD` when it names
/// the same directory as the process cwd, the physical cwd otherwise.
pub fn logical_current_dir() -> Result<PathBuf> {
    let physical = std::env::current_dir()?;

    let logical = match std::env::var_os("PWD") {
        Some(pwd) => PathBuf::from(pwd),
        None => return Ok(physical),
    };
    if !logical.is_absolute() || !same_file(&logical, &physical) {
        return Ok(physical);
    }
    Ok(normalize_lexically(&logical))
}

#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (std::fs::metadata(a), std::fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    a == b
}

/// Absolute form of the directory an install runs from, as embedded in the
/// launcher. Symlinks are kept; the path must be valid UTF-8 so the
/// launcher can name it exactly.
pub fn absolute_source_dir(cwd: &Path, dir: &Path) -> Result<PathBuf> {
    let absolute = normalize_lexically(&cwd.join(dir));

    if absolute.to_str().is_none() {
        return Err(InstallerError::Config(format!(
            "Source directory is not valid UTF-8: {}",
            absolute.display()
        )));
    }

    match std::fs::metadata(&absolute) {
        Ok(meta) if meta.is_dir() => Ok(absolute),
        Ok(_) => Err(InstallerError::Config(format!(
            "Source path is not a directory: {}",
            absolute.display()
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(InstallerError::Config(
            format!("Source directory not found: {}", absolute.display()),
        )),
        Err(e) => Err(InstallerError::from_io(&absolute, e)),
    }
}

/// True for a non-empty relative path that stays below its base.
pub fn is_contained_relative(path: &str) -> bool {
    let p = Path::new(path);
    !path.trim().is_empty()
        && p.components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment() {
        assert!(is_contained_relative("venv"));
        assert!(is_contained_relative(".envs/prod"));
        assert!(!is_contained_relative(""));
        assert!(!is_contained_relative("../venv"));
        assert!(!is_contained_relative("/venv"));
    }

    #[test]
    fn lexical_normalization() {
        assert_eq!(
            normalize_lexically(Path::new("/srv/./app/../current/")),
            PathBuf::from("/srv/current")
        );
        assert_eq!(normalize_lexically(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn logical_cwd_names_the_process_cwd() {
        let logical = logical_current_dir().unwrap();
        assert!(logical.is_absolute());
        assert!(same_file(&logical, &std::env::current_dir().unwrap()));
    }

    #[test]
    fn missing_source_dir_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = absolute_source_dir(dir.path(), Path::new("nope")).unwrap_err();
        assert!(err.to_string().contains("Source directory not found"));
    }

    #[test]
    fn file_is_not_a_source_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("setup.py"), "").unwrap();
        let err = absolute_source_dir(dir.path(), Path::new("setup.py")).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn relative_dir_joins_cwd() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("app")).unwrap();
        let resolved = absolute_source_dir(dir.path(), Path::new("./app")).unwrap();
        assert_eq!(resolved, dir.path().join("app"));
        assert!(resolved.is_absolute());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_dir_is_kept_as_written() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("releases-v3")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("releases-v3"), dir.path().join("current"))
            .unwrap();

        let resolved = absolute_source_dir(dir.path(), Path::new("current")).unwrap();

        assert_eq!(resolved, dir.path().join("current"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_dir_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let name = OsStr::from_bytes(b"app\xff");
        std::fs::create_dir(dir.path().join(name)).unwrap();

        let err = absolute_source_dir(dir.path(), Path::new(name)).unwrap_err();

        assert!(err.to_string().contains("not valid UTF-8"), "{}", err);
    }
}
