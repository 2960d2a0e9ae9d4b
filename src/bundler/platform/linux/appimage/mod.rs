//! AppImage bundler - portable Linux applications.

mod launch;
mod staging;
mod tool;

pub use launch::{ARCH_VAR, EnvMap, build_env, render_command, run_tool};
pub use staging::{FileMapping, executables, file_mappings, skeleton, stage_app_dir};
pub use tool::{
    APPIMAGETOOL_BASE_URL, Fetcher, HttpFetcher, ToolFetcher, WgetFetcher, ensure_tool,
    tool_file_name, tool_url,
};

use crate::bundler::{Arch, BundledArtifact, Result, Settings, platform::HostInfo, utils::fs};
use std::ffi::OsString;

/// Bundle project as AppImage.
///
/// # Process
///
/// 1. Checks the host is Linux on x86_64 or aarch64
/// 2. Builds the AppDir staging tree and copies the assets into it
/// 3. Downloads appimagetool unless it is already cached
/// 4. Runs appimagetool with `ARCH` overlaid on `base_env`
/// 5. Removes the staging tree
/// 6. Marks the artifact 0755
///
/// Any failure before step 5 returns immediately; in particular a failed tool
/// run leaves the staging tree on disk. Failures in steps 5 and 6 are only
/// logged.
///
/// # Returns
///
/// The artifact appimagetool wrote to `settings.output()`.
pub async fn bundle_project<F, I>(
    settings: &Settings,
    host: &HostInfo,
    fetcher: &F,
    base_env: I,
) -> Result<BundledArtifact>
where
    F: Fetcher,
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let arch = host.check()?;

    log::info!("Building AppImage for {}", settings.product_name());
    log::debug!("Using architecture: {}", arch);

    stage_app_dir(settings).await?;

    let tool = ensure_tool(settings.tool_dir(), arch, fetcher).await?;

    log::info!("Building AppImage...");
    let env = build_env(base_env, arch);
    run_tool(&tool, settings.app_dir(), settings.output(), &env).await?;

    cleanup(settings).await;

    if let Err(e) = fs::set_executable(settings.output()).await {
        log::warn!("Cannot mark artifact executable: {}", e);
    }

    let artifact = BundledArtifact::describe(settings.output()).await;
    log::info!("✓ Created AppImage: {}", artifact.path.display());
    Ok(artifact)
}

/// Command line `bundle_project` will run for `settings` on `arch`.
pub fn tool_command(settings: &Settings, arch: Arch) -> String {
    let tool = settings.tool_dir().join(tool_file_name(arch));
    render_command(
        &tool,
        &[settings.app_dir().as_os_str(), settings.output().as_os_str()],
    )
}

async fn cleanup(settings: &Settings) {
    let app_dir = settings.app_dir();
    if settings.keep_app_dir() {
        log::info!("Keeping {}", app_dir.display());
        return;
    }

    log::info!("Cleaning up {}...", app_dir.display());
    if let Err(e) = fs::remove_dir_all(app_dir).await {
        log::error!("Error removing {}: {}", app_dir.display(), e);
    }
}
