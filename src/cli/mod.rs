//! Command line interface for the AppImage packager.
//!
//! Resolves configuration from the manifest and flags, then drives
//! [`bundle_project`] and reports the artifact.

mod args;
mod output;

pub use args::{Args, FetcherKind};
pub use output::OutputManager;

use crate::bundler::{
    Arch, HostInfo, HttpFetcher, Settings, SettingsBuilder, ToolFetcher, WgetFetcher, bundle_project,
    tool_command,
};
use crate::error::{CliError, Result};
use crate::metadata::{CargoManifest, load_manifest};
use std::path::{Path, PathBuf};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(args).await
}

/// Runs the packager for already-parsed arguments.
pub async fn execute(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    if args.quiet {
        log::set_max_level(log::LevelFilter::Error);
    }
    let output = OutputManager::new(args.quiet);

    let host = HostInfo::detect()?;
    let (arch, settings) = prepare(&args, &host)?;

    output.section(&format!("Packaging {}", settings.product_name()))?;
    output.indent(&format!("Host: {} ({})", host.os, arch))?;
    output.indent(&format!("AppDir: {}", settings.app_dir().display()))?;
    output.progress("Staging AppDir, fetching appimagetool and building")?;
    output.indent(&format!("Running: {}", tool_command(&settings, arch)))?;

    let fetcher = match args.fetcher {
        FetcherKind::Wget => ToolFetcher::Wget(WgetFetcher::default()),
        FetcherKind::Http => ToolFetcher::Http(HttpFetcher),
    };

    let artifact = bundle_project(&settings, &host, &fetcher, std::env::vars_os()).await?;

    output.success("AppImage build complete!")?;
    output.indent(&format!("Path: {}", artifact.path.display()))?;
    match (&artifact.size, &artifact.checksum) {
        (Some(size), Some(checksum)) => {
            output.indent(&format!("Size: {size} bytes"))?;
            output.indent(&format!("SHA256: {checksum}"))?;
        }
        _ => output.warn("appimagetool succeeded but the artifact could not be read")?,
    }

    Ok(0)
}

/// Runs the platform guard, then resolves settings.
///
/// An unsupported host is reported before any manifest or flag problem.
pub fn prepare(args: &Args, host: &HostInfo) -> Result<(Arch, Settings)> {
    let arch = host.check()?;
    let settings = resolve_settings(args)?;
    Ok((arch, settings))
}

/// Merges manifest defaults and flags into [`Settings`].
///
/// Flags win over `[package.metadata.appimage]`, which wins over built-in
/// defaults. Paths from flags are relative to the project directory; paths
/// from the manifest are relative to the manifest's own directory.
pub fn resolve_settings(args: &Args) -> Result<Settings> {
    let manifest = read_manifest(args)?;
    let meta = manifest.as_ref().map(|m| &m.appimage);
    let manifest_dir = manifest_dir(args);
    let from_manifest = |path: &PathBuf| manifest_dir.join(path);

    let product_name = args
        .product_name
        .clone()
        .or_else(|| manifest.as_ref().map(|m| m.product_name().to_string()))
        .ok_or_else(|| CliError::MissingArgument {
            argument: "--product-name (or a Cargo.toml with [package].name)".to_string(),
        })?;

    let mut builder = SettingsBuilder::new()
        .project_dir(&args.project_dir)
        .product_name(product_name)
        .keep_app_dir(args.keep_appdir);

    if let Some(id) = args.app_id.clone().or_else(|| meta.and_then(|m| m.app_id.clone())) {
        builder = builder.app_id(id);
    }
    if let Some(binary) = args
        .binary
        .clone()
        .or_else(|| manifest.as_ref().map(|m| m.binary().to_string()))
    {
        builder = builder.binary_name(binary);
    }
    if let Some(dir) = &args.binary_dir {
        builder = builder.binary_dir(dir);
    }
    if let Some(dir) = args
        .resources_dir
        .clone()
        .or_else(|| meta.and_then(|m| m.resources_dir.as_ref()).map(from_manifest))
    {
        builder = builder.resources_dir(dir);
    }
    if let Some(size) = args
        .icon_size
        .clone()
        .or_else(|| meta.and_then(|m| m.icon_size.clone()))
    {
        builder = builder.icon_size(size);
    }
    if let Some(dir) = &args.appdir {
        builder = builder.app_dir(dir);
    }
    if let Some(path) = args
        .output
        .clone()
        .or_else(|| meta.and_then(|m| m.output.as_ref()).map(from_manifest))
    {
        builder = builder.output(path);
    }
    if let Some(dir) = &args.tool_dir {
        builder = builder.tool_dir(dir);
    }

    Ok(builder.build()?)
}

/// Directory of the manifest, relative to the project directory unless the
/// manifest was given as an absolute path.
fn manifest_dir(args: &Args) -> PathBuf {
    args.manifest
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

fn read_manifest(args: &Args) -> Result<Option<CargoManifest>> {
    match &args.manifest {
        Some(path) => load_manifest(&args.project_dir.join(path)).map(Some),
        None => {
            let default = args.project_dir.join("Cargo.toml");
            if default.is_file() {
                log::debug!("Reading defaults from {}", default.display());
                load_manifest(&default).map(Some)
            } else {
                Ok(None)
            }
        }
    }
}
