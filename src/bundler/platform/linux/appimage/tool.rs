//! appimagetool retrieval and caching.
//!
//! The tool is cached as `appimagetool-<arch>.AppImage` in the tool directory
//! and reused by every later run on the same architecture.

use crate::bundler::{
    Arch, Error, Result,
    utils::{fs, http},
};
use std::{
    ffi::OsStr,
    future::Future,
    path::{Path, PathBuf},
};

use super::launch::render_command;

/// Release channel the tool is downloaded from.
pub const APPIMAGETOOL_BASE_URL: &str =
    "https://github.com/AppImage/AppImageKit/releases/download/continuous";

/// Cached file name of the tool for `arch`.
pub fn tool_file_name(arch: Arch) -> String {
    format!("appimagetool-{}.AppImage", arch.appimage_tag())
}

/// Download URL of the tool for `arch`.
pub fn tool_url(arch: Arch) -> String {
    format!("{}/{}", APPIMAGETOOL_BASE_URL, tool_file_name(arch))
}

/// Something that can place the contents of a URL at a path.
pub trait Fetcher {
    /// Retrieve `url` into `dest`. Called at most once per run.
    fn fetch(&self, url: &str, dest: &Path) -> impl Future<Output = Result<()>>;
}

/// Downloads with an external `wget`.
#[derive(Clone, Debug)]
pub struct WgetFetcher {
    program: String,
}

impl Default for WgetFetcher {
    fn default() -> Self {
        Self {
            program: "wget".to_string(),
        }
    }
}

impl WgetFetcher {
    /// Use a different retrieval program with wget-compatible flags.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Fetcher for WgetFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let failed = |reason: String| Error::DownloadFailed {
            url: url.to_string(),
            reason,
        };

        let program = which::which(&self.program)
            .map_err(|e| failed(format!("{} not found: {e}", self.program)))?;

        let args = [
            OsStr::new("-q"),
            OsStr::new("-O"),
            dest.as_os_str(),
            OsStr::new(url),
        ];
        log::info!("--- Running: {}", render_command(&program, &args));

        let status = tokio::process::Command::new(&program)
            .args(args)
            .status()
            .await
            .map_err(|e| failed(format!("failed to execute {}: {e}", program.display())))?;

        if !status.success() {
            // wget -O leaves an empty file behind on failure
            discard_partial(dest).await;
            return Err(failed(format!("{} exited with {status}", self.program)));
        }
        Ok(())
    }
}

/// Removes a failed download. The download error stays the reported one.
async fn discard_partial(dest: &Path) {
    if let Err(e) = fs::remove_file(dest).await {
        log::warn!("Cannot remove partial download: {}", e);
    }
}

/// Downloads in-process over HTTPS.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpFetcher;

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let result = http::download_to_file(url, dest).await;
        if result.is_err() {
            discard_partial(dest).await;
        }
        result
    }
}

/// Retrieval backend chosen at runtime.
#[derive(Clone, Debug)]
pub enum ToolFetcher {
    /// External `wget`.
    Wget(WgetFetcher),
    /// Built-in HTTP client.
    Http(HttpFetcher),
}

impl Fetcher for ToolFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        match self {
            Self::Wget(f) => f.fetch(url, dest).await,
            Self::Http(f) => f.fetch(url, dest).await,
        }
    }
}

/// Returns the cached tool for `arch`, downloading it first if absent.
///
/// A fresh download is marked executable. A cached file is used as-is.
pub async fn ensure_tool<F: Fetcher>(tool_dir: &Path, arch: Arch, fetcher: &F) -> Result<PathBuf> {
    let file_name = tool_file_name(arch);
    let tool_path = tool_dir.join(&file_name);

    if fs::is_file(&tool_path).await {
        log::info!("{} already exists, skipping download.", file_name);
        return Ok(tool_path);
    }

    log::info!("Downloading {}...", file_name);
    fs::create_dir_all(tool_dir).await?;
    fetcher.fetch(&tool_url(arch), &tool_path).await?;
    fs::set_executable(&tool_path).await?;

    Ok(tool_path)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    /// Writes a fixed body instead of touching the network, and counts calls.
    pub(crate) struct FakeFetcher {
        body: Option<String>,
        calls: AtomicUsize,
        pub(crate) last_url: Mutex<Option<String>>,
    }

    impl FakeFetcher {
        pub(crate) fn serving(body: &str) -> Self {
            Self {
                body: Some(body.to_string()),
                calls: AtomicUsize::new(0),
                last_url: Mutex::new(None),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                body: None,
                calls: AtomicUsize::new(0),
                last_url: Mutex::new(None),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Fetcher for FakeFetcher {
        async fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_url.lock().unwrap() = Some(url.to_string());
            match &self.body {
                Some(body) => {
                    std::fs::write(dest, body)?;
                    Ok(())
                }
                None => Err(Error::DownloadFailed {
                    url: url.to_string(),
                    reason: "connection refused".into(),
                }),
            }
        }
    }

    #[test]
    fn names_follow_arch() {
        assert_eq!(tool_file_name(Arch::X86_64), "appimagetool-x86_64.AppImage");
        assert_eq!(
            tool_url(Arch::AArch64),
            "https://github.com/AppImage/AppImageKit/releases/download/continuous/appimagetool-aarch64.AppImage"
        );
    }

    #[tokio::test]
    async fn cached_tool_is_reused() {
        let tmp = tempfile::tempdir().unwrap();
        let cached = tmp.path().join("appimagetool-x86_64.AppImage");
        std::fs::write(&cached, "cached").unwrap();
        let fetcher = FakeFetcher::serving("fresh");

        let path = ensure_tool(tmp.path(), Arch::X86_64, &fetcher).await.unwrap();

        assert_eq!(path, cached);
        assert_eq!(fetcher.calls(), 0);
        assert_eq!(std::fs::read_to_string(&cached).unwrap(), "cached");
    }

    #[tokio::test]
    async fn absent_tool_is_fetched_once_and_made_executable() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::serving("tool");

        let path = ensure_tool(tmp.path(), Arch::AArch64, &fetcher).await.unwrap();

        assert_eq!(fetcher.calls(), 1);
        assert_eq!(
            fetcher.last_url.lock().unwrap().as_deref(),
            Some(tool_url(Arch::AArch64).as_str())
        );
        assert_eq!(path, tmp.path().join("appimagetool-aarch64.AppImage"));
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = FakeFetcher::failing();

        let err = ensure_tool(tmp.path(), Arch::X86_64, &fetcher)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::DownloadFailed { .. }));
        assert_eq!(fetcher.calls(), 1);
        assert!(!tmp.path().join("appimagetool-x86_64.AppImage").exists());
    }

    #[tokio::test]
    async fn missing_wget_binary_is_a_download_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = WgetFetcher::with_program("definitely-not-a-real-wget-binary");

        let err = fetcher
            .fetch("https://example.invalid/tool", &tmp.path().join("tool"))
            .await
            .unwrap_err();

        match err {
            Error::DownloadFailed { url, reason } => {
                assert_eq!(url, "https://example.invalid/tool");
                assert!(reason.contains("not found"), "{reason}");
            }
            other => panic!("expected DownloadFailed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_retrieval_program_leaves_no_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("tool");
        // `false` accepts any arguments and exits 1
        let fetcher = WgetFetcher::with_program("false");

        let err = fetcher
            .fetch("https://example.invalid/tool", &dest)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("false exited with"), "{err}");
        assert!(!dest.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unremovable_partial_keeps_the_download_error() {
        let tmp = tempfile::tempdir().unwrap();
        // A directory at the target cannot be removed as a file.
        let dest = tmp.path().join("tool");
        std::fs::create_dir(&dest).unwrap();
        let fetcher = WgetFetcher::with_program("false");

        let err = fetcher
            .fetch("https://example.invalid/tool", &dest)
            .await
            .unwrap_err();

        match err {
            Error::DownloadFailed { url, reason } => {
                assert_eq!(url, "https://example.invalid/tool");
                assert!(reason.contains("exited with"), "{reason}");
            }
            other => panic!("expected DownloadFailed, got {other:?}"),
        }
    }
}
