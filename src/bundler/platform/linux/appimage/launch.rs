//! appimagetool invocation.

use crate::bundler::{Arch, Error, Result};
use std::{
    collections::BTreeMap,
    ffi::{OsStr, OsString},
    path::Path,
};

/// Environment handed to a child process, in full.
pub type EnvMap = BTreeMap<OsString, OsString>;

/// Variable appimagetool reads the target architecture from.
pub const ARCH_VAR: &str = "ARCH";

/// Copies `base` and overlays `ARCH=<tag>`.
///
/// The running process's own environment is never modified.
pub fn build_env<I>(base: I, arch: Arch) -> EnvMap
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut env: EnvMap = base.into_iter().collect();
    env.insert(ARCH_VAR.into(), arch.appimage_tag().into());
    env
}

/// Renders a command line for display.
pub fn render_command(program: &Path, args: &[&OsStr]) -> String {
    std::iter::once(program.as_os_str())
        .chain(args.iter().copied())
        .map(OsStr::to_string_lossy)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs `tool <app_dir> <output>` with exactly `env`.
///
/// Fails if the tool cannot be spawned or exits non-zero.
pub async fn run_tool(tool: &Path, app_dir: &Path, output: &Path, env: &EnvMap) -> Result<()> {
    let args = [app_dir.as_os_str(), output.as_os_str()];
    let command = render_command(tool, &args);
    log::info!("--- Running: {}", command);
    log::debug!("{}={:?}", ARCH_VAR, env.get(OsStr::new(ARCH_VAR)));

    let status = tokio::process::Command::new(tool)
        .args(args)
        .env_clear()
        .envs(env)
        .status()
        .await
        .map_err(|e| Error::ToolFailed {
            command: command.clone(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(Error::ToolFailed {
            command,
            reason: format!("exited with {status}"),
        });
    }
    Ok(())
}
