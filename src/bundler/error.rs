//! Error types for AppImage packaging operations.
//!
//! Every fatal pipeline failure has its own variant so callers can tell a
//! host guard rejection apart from a missing input or a failed tool run.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};

/// Result alias for bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while packaging.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Host operating system is not Linux.
    #[error("This packager runs only on Linux. Detected OS: {os}")]
    UnsupportedPlatform {
        /// OS identifier reported by the host
        os: String,
    },

    /// Host CPU architecture has no appimagetool build.
    #[error("Unsupported architecture: {arch}")]
    UnsupportedArch {
        /// Machine identifier reported by the host
        arch: String,
    },

    /// A file listed in the copy table does not exist.
    #[error(
        "Error copying file {}: {error}\nPlease ensure all source files exist.",
        path.display()
    )]
    MissingSource {
        /// Source path that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        error: io::Error,
    },

    /// The bundling tool could not be retrieved.
    #[error("Failed to download {url}: {reason}")]
    DownloadFailed {
        /// URL that was requested
        url: String,
        /// What went wrong
        reason: String,
    },

    /// The bundling tool could not be started or exited non-zero.
    #[error("Error executing command `{command}`: {reason}")]
    ToolFailed {
        /// Full command line
        command: String,
        /// What went wrong
        reason: String,
    },

    /// Filesystem operation failed on a known path.
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// Operation being performed
        context: &'static str,
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        error: io::Error,
    },

    /// Bare I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

/// Attach a message to a failing `Result` or an empty `Option`.
pub trait Context<T> {
    /// Replace the failure with `context`, keeping the original error text.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Lazily built variant of [`Context::context`].
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error> Context<T> for std::result::Result<T, E> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::GenericError(format!("{}: {e}", f())))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Tag an I/O failure with the operation and path it happened on.
pub trait ErrorExt<T> {
    /// Convert into [`Error::Fs`].
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Return early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
