//! AppImage packager library
//!
//! Stages an AppDir from a prebuilt Linux binary and its desktop assets,
//! fetches appimagetool on first use, and runs it to produce a single-file
//! AppImage.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
