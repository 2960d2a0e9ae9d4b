//! AppImage packaging.
//!
//! The pipeline lives in [`platform::linux::appimage`]; this module re-exports
//! the types callers need to configure and drive it.
//!
//! # Example
//!
//! ```no_run
//! use appimage_packager::bundler::{
//!     HostInfo, SettingsBuilder, ToolFetcher, WgetFetcher, bundle_project,
//! };
//!
//! # async fn example() -> appimage_packager::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .product_name("Calcurus")
//!     .build()?;
//!
//! let artifact = bundle_project(
//!     &settings,
//!     &HostInfo::detect()?,
//!     &ToolFetcher::Wget(WgetFetcher::default()),
//!     std::env::vars_os(),
//! )
//! .await?;
//!
//! println!("Created: {}", artifact.path.display());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

pub use builder::BundledArtifact;
pub use error::{Error, Result};
pub use platform::{
    HostInfo,
    linux::appimage::{
        EnvMap, Fetcher, FileMapping, HttpFetcher, ToolFetcher, WgetFetcher, bundle_project,
        tool_command,
    },
};
pub use settings::{Arch, Settings, SettingsBuilder};
