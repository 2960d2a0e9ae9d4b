//! File system utilities for staging.
//!
//! Thin wrappers over `tokio::fs` that make directory creation and removal
//! idempotent and attach paths to every error.

use crate::{
    bail,
    bundler::error::{Error, ErrorExt, Result},
};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Creates all of the directories of the specified path.
///
/// An existing directory is not an error.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Fs {
            context: "removing directory",
            path: path.to_path_buf(),
            error: e,
        }),
    }
}

/// Removes a file if it exists.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Fs {
            context: "removing file",
            path: path.to_path_buf(),
            error: e,
        }),
    }
}

/// Returns true if `path` exists and is a regular file.
pub async fn is_file(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_file())
}

/// Copies a regular file.
///
/// If `to` is an existing directory the file keeps its name inside it.
/// Parent directories are not created. A source that resolves to the same
/// file as the destination is left untouched.
///
/// Returns the path that was written.
pub async fn copy_file(from: &Path, to: &Path) -> Result<PathBuf> {
    let metadata = fs::metadata(from)
        .await
        .map_err(|error| Error::MissingSource {
            path: from.to_path_buf(),
            error,
        })?;
    if !metadata.is_file() {
        bail!("{} is not a file", from.display());
    }

    let dest = if fs::metadata(to).await.is_ok_and(|m| m.is_dir()) {
        match from.file_name() {
            Some(name) => to.join(name),
            None => bail!("{} has no file name", from.display()),
        }
    } else {
        to.to_path_buf()
    };

    if same_file(from, &dest).await {
        log::debug!("{} is already in place, skipping", dest.display());
        return Ok(dest);
    }

    fs::copy(from, &dest)
        .await
        .fs_context("copying file to", &dest)?;
    Ok(dest)
}

async fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a).await, fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Sets mode 0755 on `path`, replacing whatever bits were there.
pub async fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .await
            .fs_context("setting permissions on", path)?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn copy_into_directory_keeps_file_name() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("calcurus.desktop");
        std::fs::write(&src, "[Desktop Entry]\n").unwrap();
        let dir = tmp.path().join("applications");
        std::fs::create_dir(&dir).unwrap();

        let written = copy_file(&src, &dir).await.unwrap();

        assert_eq!(written, dir.join("calcurus.desktop"));
        assert_eq!(std::fs::read_to_string(written).unwrap(), "[Desktop Entry]\n");
    }

    #[tokio::test]
    async fn copy_onto_itself_is_tolerated() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("AppRun");
        std::fs::write(&src, "#!/bin/sh\n").unwrap();

        let written = copy_file(&src, &src).await.unwrap();
        assert_eq!(written, src);
        assert_eq!(std::fs::read_to_string(&src).unwrap(), "#!/bin/sh\n");

        // Same file reached through the directory form.
        copy_file(&src, tmp.path()).await.unwrap();
        assert_eq!(std::fs::read_to_string(&src).unwrap(), "#!/bin/sh\n");
    }

    #[tokio::test]
    async fn missing_source_names_the_path() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("nope.png");

        let err = copy_file(&src, &tmp.path().join("out.png"))
            .await
            .unwrap_err();

        match err {
            Error::MissingSource { path, error } => {
                assert_eq!(path, src);
                assert_eq!(error.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected MissingSource, got {other:?}"),
        }
        assert!(!tmp.path().join("out.png").exists());
    }

    #[tokio::test]
    async fn directory_source_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let err = copy_file(tmp.path(), &tmp.path().join("x")).await.unwrap_err();
        assert!(err.to_string().contains("is not a file"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn set_executable_overwrites_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("tool");
        std::fs::write(&file, "").unwrap();
        std::fs::set_permissions(&file, std::fs::Permissions::from_mode(0o600)).unwrap();

        set_executable(&file).await.unwrap();

        let mode = std::fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[tokio::test]
    async fn removals_are_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("AppDir");
        create_dir_all(&dir.join("usr/bin")).await.unwrap();
        create_dir_all(&dir.join("usr/bin")).await.unwrap();

        remove_dir_all(&dir).await.unwrap();
        assert!(!dir.exists());
        remove_dir_all(&dir).await.unwrap();
        remove_file(&tmp.path().join("absent")).await.unwrap();
    }
}
