//! Packaging defaults read from the project's Cargo.toml.
//!
//! ```toml
//! [package]
//! name = "Calcurus"
//!
//! [package.metadata.appimage]
//! app-id = "calcurus"
//! resources-dir = "resources"
//! icon-size = "4000x4000"
//! output = "dist/Calcurus.AppImage"
//! ```

use crate::error::{BundlerError, CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of `[package.metadata.appimage]`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct AppImageMetadata {
    /// Display name; defaults to the package name
    pub product_name: Option<String>,
    /// Desktop entry and icon stem
    pub app_id: Option<String>,
    /// Binary file name; defaults to the first `[[bin]]` target
    pub binary: Option<String>,
    /// Resources directory, relative to the manifest
    pub resources_dir: Option<PathBuf>,
    /// Hicolor size directory of the raster icon
    pub icon_size: Option<String>,
    /// Artifact path, relative to the manifest
    pub output: Option<PathBuf>,
}

/// What the packager takes from a manifest.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CargoManifest {
    /// `[package].name`
    pub package_name: String,

    /// Primary binary name (from `[[bin]]` or package name)
    pub binary_name: String,

    /// AppImage overrides
    pub appimage: AppImageMetadata,
}

impl CargoManifest {
    /// Product name after applying the metadata override.
    pub fn product_name(&self) -> &str {
        self.appimage
            .product_name
            .as_deref()
            .unwrap_or(&self.package_name)
    }

    /// Binary name after applying the metadata override.
    pub fn binary(&self) -> &str {
        self.appimage.binary.as_deref().unwrap_or(&self.binary_name)
    }
}

#[derive(Deserialize)]
struct RawManifest {
    package: Option<RawPackage>,
    #[serde(default)]
    bin: Vec<RawBin>,
}

#[derive(Deserialize)]
struct RawPackage {
    name: String,
    #[serde(default)]
    metadata: RawMetadata,
}

#[derive(Default, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    appimage: AppImageMetadata,
}

#[derive(Deserialize)]
struct RawBin {
    name: Option<String>,
}

/// Parses manifest text.
pub fn parse_manifest(manifest: &str) -> Result<CargoManifest> {
    let raw: RawManifest = toml::from_str(manifest)?;

    let package = raw.package.ok_or_else(|| {
        BundlerError::Cli(CliError::InvalidArguments {
            reason: "No [package] section in Cargo.toml".to_string(),
        })
    })?;

    let binary_name = raw
        .bin
        .into_iter()
        .find_map(|b| b.name)
        .unwrap_or_else(|| package.name.clone());

    Ok(CargoManifest {
        package_name: package.name,
        binary_name,
        appimage: package.metadata.appimage,
    })
}

/// Reads and parses the manifest at `cargo_toml_path`.
pub fn load_manifest(cargo_toml_path: &Path) -> Result<CargoManifest> {
    let manifest = std::fs::read_to_string(cargo_toml_path).map_err(|e| {
        BundlerError::Cli(CliError::ExecutionFailed {
            command: "read_cargo_toml".to_string(),
            reason: format!("Failed to read {}: {}", cargo_toml_path.display(), e),
        })
    })?;

    parse_manifest(&manifest)
}
