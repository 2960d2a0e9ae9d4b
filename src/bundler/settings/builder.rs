//! Builder for constructing Settings.

use super::{DEFAULT_ICON_SIZE, Settings};
use crate::bail;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Unset paths fall back to the conventional project layout:
///
/// | setting         | default              |
/// |-----------------|----------------------|
/// | `binary_dir`    | `target/release`     |
/// | `resources_dir` | `resources`          |
/// | `app_dir`       | `AppDir`             |
/// | `output`        | `<product>.AppImage` |
/// | `tool_dir`      | project directory    |
///
/// Relative paths are joined onto `project_dir` (default `.`).
///
/// # Examples
///
/// ```
/// use appimage_packager::bundler::SettingsBuilder;
///
/// # fn example() -> appimage_packager::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .product_name("Calcurus")
///     .resources_dir("assets")
///     .keep_app_dir(true)
///     .build()?;
///
/// assert_eq!(settings.binary_name(), "Calcurus");
/// assert!(settings.resources_dir().ends_with("assets"));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    project_dir: Option<PathBuf>,
    product_name: Option<String>,
    app_id: Option<String>,
    binary_name: Option<String>,
    binary_dir: Option<PathBuf>,
    resources_dir: Option<PathBuf>,
    icon_size: Option<String>,
    app_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    tool_dir: Option<PathBuf>,
    keep_app_dir: bool,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the directory every relative path is resolved against.
    pub fn project_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the product name.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    /// Sets the desktop/icon identifier.
    ///
    /// Default: lowercased product name
    pub fn app_id(mut self, id: impl Into<String>) -> Self {
        self.app_id = Some(id.into());
        self
    }

    /// Sets the binary file name.
    ///
    /// Default: product name
    pub fn binary_name(mut self, name: impl Into<String>) -> Self {
        self.binary_name = Some(name.into());
        self
    }

    /// Sets the directory holding the compiled binary.
    pub fn binary_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.binary_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the resources directory.
    pub fn resources_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.resources_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the hicolor size directory of the raster icon.
    ///
    /// Default: `4000x4000`
    pub fn icon_size(mut self, size: impl Into<String>) -> Self {
        self.icon_size = Some(size.into());
        self
    }

    /// Sets the staging tree root.
    pub fn app_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.app_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the artifact path.
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the tool cache directory.
    pub fn tool_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.tool_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keep the staging tree after a successful build.
    ///
    /// Default: false
    pub fn keep_app_dir(mut self, keep: bool) -> Self {
        self.keep_app_dir = keep;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the product name is missing, or if any name
    /// (product, app id, binary) is empty or contains a path separator.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        let Some(product_name) = self.product_name else {
            bail!("product_name is required");
        };
        let app_id = self
            .app_id
            .unwrap_or_else(|| product_name.to_lowercase());
        let binary_name = self.binary_name.unwrap_or_else(|| product_name.clone());

        for (field, value) in [
            ("product_name", &product_name),
            ("app_id", &app_id),
            ("binary_name", &binary_name),
        ] {
            if value.trim().is_empty() {
                bail!("{field} must not be empty");
            }
            if value.contains('/') {
                bail!("{field} must not contain '/': {value}");
            }
        }

        let project_dir = self.project_dir.unwrap_or_else(|| PathBuf::from("."));
        let resolve = |path: Option<PathBuf>, default: &str| project_dir.join(path.unwrap_or_else(|| default.into()));

        let output_default = format!("{product_name}.AppImage");

        Ok(Settings {
            binary_dir: resolve(self.binary_dir, "target/release"),
            resources_dir: resolve(self.resources_dir, "resources"),
            app_dir: resolve(self.app_dir, "AppDir"),
            output: resolve(self.output, &output_default),
            tool_dir: match self.tool_dir {
                Some(dir) => project_dir.join(dir),
                None => project_dir.clone(),
            },
            icon_size: self
                .icon_size
                .unwrap_or_else(|| DEFAULT_ICON_SIZE.to_string()),
            keep_app_dir: self.keep_app_dir,
            product_name,
            app_id,
            binary_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_names_from_product() {
        let settings = SettingsBuilder::new()
            .project_dir("/proj")
            .product_name("Calcurus")
            .build()
            .unwrap();

        assert_eq!(settings.app_id(), "calcurus");
        assert_eq!(settings.binary_name(), "Calcurus");
        assert_eq!(
            settings.binary_path(),
            PathBuf::from("/proj/target/release/Calcurus")
        );
        assert_eq!(settings.resources_dir(), Path::new("/proj/resources"));
        assert_eq!(settings.app_dir(), Path::new("/proj/AppDir"));
        assert_eq!(settings.output(), Path::new("/proj/Calcurus.AppImage"));
        assert_eq!(settings.tool_dir(), Path::new("/proj"));
        assert_eq!(settings.icon_size(), DEFAULT_ICON_SIZE);
        assert!(!settings.keep_app_dir());
    }

    #[test]
    fn absolute_overrides_ignore_project_dir() {
        let settings = SettingsBuilder::new()
            .project_dir("/proj")
            .product_name("Calcurus")
            .output("/dist/calc.AppImage")
            .tool_dir("/cache")
            .build()
            .unwrap();

        assert_eq!(settings.output(), Path::new("/dist/calc.AppImage"));
        assert_eq!(settings.tool_dir(), Path::new("/cache"));
    }

    #[test]
    fn missing_product_name_is_rejected() {
        let err = SettingsBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("product_name is required"));
    }

    #[test]
    fn separators_in_names_are_rejected() {
        let err = SettingsBuilder::new()
            .product_name("Calcurus")
            .binary_name("../Calcurus")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("binary_name"));

        let err = SettingsBuilder::new()
            .product_name("Calcurus")
            .app_id("  ")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("app_id must not be empty"));
    }
}
