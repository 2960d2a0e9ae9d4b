//! Artifact reporting.
//!
//! Once appimagetool exits successfully the pipeline describes what it
//! produced. Describing never fails the run: the tool's exit status is the
//! only success criterion, so unreadable artifacts are reported with empty
//! size and checksum.

mod checksum;

pub use checksum::calculate_sha256;

use std::path::{Path, PathBuf};

/// A file produced by a packaging run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BundledArtifact {
    /// Where the artifact was written.
    pub path: PathBuf,
    /// Size in bytes, when the file could be read.
    pub size: Option<u64>,
    /// Hex SHA-256, when the file could be read.
    pub checksum: Option<String>,
}

impl BundledArtifact {
    /// Collects size and checksum for `path`.
    pub async fn describe(path: &Path) -> Self {
        let size = match tokio::fs::metadata(path).await {
            Ok(meta) => Some(meta.len()),
            Err(e) => {
                log::warn!("Cannot stat artifact {}: {}", path.display(), e);
                None
            }
        };

        let checksum = match size {
            Some(_) => match calculate_sha256(path).await {
                Ok(sum) => Some(sum),
                Err(e) => {
                    log::warn!("Cannot hash artifact: {}", e);
                    None
                }
            },
            None => None,
        };

        Self {
            path: path.to_path_buf(),
            size,
            checksum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn describes_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("Calcurus.AppImage");
        std::fs::write(&file, "abc").unwrap();

        let artifact = BundledArtifact::describe(&file).await;

        assert_eq!(artifact.path, file);
        assert_eq!(artifact.size, Some(3));
        assert_eq!(artifact.checksum.as_deref().map(str::len), Some(64));
    }

    #[tokio::test]
    async fn missing_file_is_described_without_details() {
        let tmp = tempfile::tempdir().unwrap();
        let artifact = BundledArtifact::describe(&tmp.path().join("gone")).await;
        assert_eq!(artifact.size, None);
        assert_eq!(artifact.checksum, None);
    }
}
