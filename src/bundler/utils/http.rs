//! HTTP utilities for downloading bundler tools.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Downloads `url` into `dest`, streaming the body chunk by chunk.
///
/// Non-2xx responses are errors. A partially written file is left for the
/// caller to remove.
pub async fn download_to_file(url: &str, dest: &Path) -> Result<()> {
    log::info!("Downloading {}", url);

    let failed = |reason: String| Error::DownloadFailed {
        url: url.to_string(),
        reason,
    };

    let mut response = reqwest::get(url)
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| failed(e.to_string()))?;

    let mut file = tokio::fs::File::create(dest)
        .await
        .fs_context("creating download target", dest)?;

    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| failed(format!("failed to read response: {e}")))?
    {
        file.write_all(&chunk)
            .await
            .fs_context("writing download to", dest)?;
    }
    file.flush().await.fs_context("flushing download to", dest)?;

    Ok(())
}
