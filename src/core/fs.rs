use crate::core::error::{InstallerError, Result};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub async fn compute_sha256(path: &Path) -> Result<String> {
    let mut file = File::open(path).await?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0; 8192];

    loop {
        let n = file.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    let hash = hasher.finalize();
    Ok(format!("{:x}", hash))
}

pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| InstallerError::from_io(path, e))?;
    }
    Ok(())
}

/// Writes `content` to `path` with the given mode, replacing whatever was
/// there. The data lands in a sibling temp file first and is renamed into
/// place, so `path` always holds either the old or the new content.
pub async fn write_atomic(path: &Path, content: &[u8], mode: u32) -> Result<()> {
    let tmp = temp_sibling(path)?;

    let result = write_and_rename(&tmp, path, content, mode).await;
    if result.is_err() {
        let _ = tokio::fs::remove_file(&tmp).await;
    }
    result
}

async fn write_and_rename(tmp: &Path, path: &Path, content: &[u8], mode: u32) -> Result<()> {
    let mut file = File::create(tmp)
        .await
        .map_err(|e| InstallerError::from_io(path, e))?;
    file.write_all(content).await?;
    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    set_mode(tmp, mode).await?;

    tokio::fs::rename(tmp, path)
        .await
        .map_err(|e| InstallerError::from_io(path, e))?;
    Ok(())
}

/// Follows a symlink at `path` to the file it names, so a replacement lands
/// on that file and the link survives. Dangling links resolve to their
/// destination; anything else is returned unchanged.
pub async fn resolve_write_target(path: &Path) -> Result<PathBuf> {
    match tokio::fs::symlink_metadata(path).await {
        Ok(meta) if meta.file_type().is_symlink() => {}
        _ => return Ok(path.to_path_buf()),
    }

    match tokio::fs::canonicalize(path).await {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let dest = tokio::fs::read_link(path)
                .await
                .map_err(|e| InstallerError::from_io(path, e))?;
            Ok(match (dest.is_absolute(), path.parent()) {
                (false, Some(parent)) => parent.join(dest),
                _ => dest,
            })
        }
        Err(e) => Err(InstallerError::from_io(path, e)),
    }
}

fn temp_sibling(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| InstallerError::Config(format!("Invalid target path: {}", path.display())))?;

    let tmp_name = format!(".{}.tmp-{}", name, std::process::id());
    Ok(match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    })
}

#[cfg(unix)]
pub async fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let permissions = std::fs::Permissions::from_mode(mode);
    tokio::fs::set_permissions(path, permissions)
        .await
        .map_err(|e| InstallerError::from_io(path, e))?;
    Ok(())
}

#[cfg(not(unix))]
pub async fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
pub async fn file_mode(path: &Path) -> Result<u32> {
    use std::os::unix::fs::PermissionsExt;
    let metadata = tokio::fs::metadata(path).await?;
    Ok(metadata.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
pub async fn file_mode(_path: &Path) -> Result<u32> {
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_atomic_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launcher");
        tokio::fs::write(&path, "old contents that are longer")
            .await
            .unwrap();

        write_atomic(&path, b"new", 0o700).await.unwrap();

        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "new");
    }

    #[tokio::test]
    async fn write_atomic_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launcher");

        write_atomic(&path, b"x", 0o700).await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("launcher")]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn write_atomic_applies_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launcher");

        write_atomic(&path, b"x", 0o700).await.unwrap();

        assert_eq!(file_mode(&path).await.unwrap(), 0o700);
    }

    #[tokio::test]
    async fn write_atomic_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("launcher");

        assert!(write_atomic(&path, b"x", 0o700).await.is_err());
    }

    #[tokio::test]
    async fn sha256_of_known_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f");
        tokio::fs::write(&path, "abc").await.unwrap();

        assert_eq!(
            compute_sha256(&path).await.unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn write_target_follows_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real");
        let link = dir.path().join("link");
        std::os::unix::fs::symlink("real", &link).unwrap();

        // dangling: resolves relative to the link's directory
        assert_eq!(resolve_write_target(&link).await.unwrap(), real);

        std::fs::write(&real, "x").unwrap();
        assert_eq!(
            resolve_write_target(&link).await.unwrap(),
            real.canonicalize().unwrap()
        );
        assert_eq!(resolve_write_target(&real).await.unwrap(), real);
    }
}
