//! Core Settings struct and implementations.

use std::path::{Path, PathBuf};

/// Icon size directory used for the raster icon when none is configured.
pub const DEFAULT_ICON_SIZE: &str = "4000x4000";

/// Resolved configuration for one packaging run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Every path is
/// already resolved against the project directory, so the pipeline never has
/// to consult the working directory.
///
/// # Examples
///
/// ```
/// use appimage_packager::bundler::SettingsBuilder;
///
/// # fn example() -> appimage_packager::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_dir("/work/calcurus")
///     .product_name("Calcurus")
///     .build()?;
///
/// assert_eq!(settings.app_id(), "calcurus");
/// assert!(settings.output().ends_with("Calcurus.AppImage"));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Display name, also the default artifact stem (e.g. `Calcurus`).
    pub(super) product_name: String,

    /// Lowercase identifier used for the desktop entry and icon file names.
    pub(super) app_id: String,

    /// File name of the compiled binary.
    pub(super) binary_name: String,

    /// Directory holding the compiled binary (`target/release`).
    pub(super) binary_dir: PathBuf,

    /// Directory holding `AppRun`, the desktop entry and the icon theme tree.
    pub(super) resources_dir: PathBuf,

    /// Hicolor size directory for the raster icon.
    pub(super) icon_size: String,

    /// Staging tree root.
    pub(super) app_dir: PathBuf,

    /// Artifact path handed to appimagetool.
    pub(super) output: PathBuf,

    /// Directory where the appimagetool download is cached.
    pub(super) tool_dir: PathBuf,

    /// Leave the staging tree on disk after a successful build.
    pub(super) keep_app_dir: bool,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Returns the desktop/icon identifier.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Returns the compiled binary's file name.
    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }

    /// Returns the path of the compiled binary.
    pub fn binary_path(&self) -> PathBuf {
        self.binary_dir.join(&self.binary_name)
    }

    /// Returns the resources directory.
    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    /// Returns the hicolor size directory of the raster icon.
    pub fn icon_size(&self) -> &str {
        &self.icon_size
    }

    /// Returns the staging tree root.
    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    /// Returns the artifact path.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Returns the tool cache directory.
    pub fn tool_dir(&self) -> &Path {
        &self.tool_dir
    }

    /// Whether cleanup is skipped.
    pub fn keep_app_dir(&self) -> bool {
        self.keep_app_dir
    }
}
