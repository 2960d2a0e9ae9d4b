//! Command line argument parsing and validation.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How appimagetool is downloaded on first use.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum FetcherKind {
    /// Run `wget`
    #[default]
    Wget,
    /// Built-in HTTPS client
    Http,
}

/// Package a prebuilt Linux binary as an AppImage
#[derive(Parser, Debug)]
#[command(
    name = "package_appimage",
    version,
    about = "Package a prebuilt Linux binary as an AppImage",
    long_about = "Stages an AppDir from a compiled binary and its desktop assets, then runs appimagetool on it.

Expected project layout (paths configurable):
  target/release/<Binary>
  resources/AppRun
  resources/<app-id>.desktop
  resources/icons/hicolor/<icon-size>/apps/<app-id>.png
  resources/icons/hicolor/scalable/apps/<app-id>.svg

appimagetool-<arch>.AppImage is downloaded next to the project on first use and reused afterwards.

Usage:
  package_appimage --product-name Calcurus
  package_appimage --project-dir ../calcurus --output dist/Calcurus.AppImage

Exit code 0 = appimagetool reported success."
)]
pub struct Args {
    /// Directory relative paths are resolved against
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".", env = "APPIMAGE_PROJECT_DIR")]
    pub project_dir: PathBuf,

    /// Cargo.toml to read defaults from (default: <project-dir>/Cargo.toml if present)
    #[arg(long, value_name = "PATH", env = "APPIMAGE_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Application name, also the default output stem
    #[arg(short = 'n', long, value_name = "NAME", env = "APPIMAGE_PRODUCT_NAME")]
    pub product_name: Option<String>,

    /// Desktop entry and icon stem (default: lowercased product name)
    #[arg(long, value_name = "ID", env = "APPIMAGE_APP_ID")]
    pub app_id: Option<String>,

    /// Binary file name (default: product name)
    #[arg(short = 'b', long, value_name = "NAME", env = "APPIMAGE_BINARY")]
    pub binary: Option<String>,

    /// Directory holding the compiled binary
    #[arg(long, value_name = "DIR", env = "APPIMAGE_BINARY_DIR")]
    pub binary_dir: Option<PathBuf>,

    /// Directory holding AppRun, the desktop entry and icons
    #[arg(long, value_name = "DIR", env = "APPIMAGE_RESOURCES_DIR")]
    pub resources_dir: Option<PathBuf>,

    /// Hicolor size directory of the PNG icon
    #[arg(long, value_name = "WxH", env = "APPIMAGE_ICON_SIZE")]
    pub icon_size: Option<String>,

    /// Staging directory, removed after a successful build
    #[arg(long, value_name = "DIR", env = "APPIMAGE_APPDIR")]
    pub appdir: Option<PathBuf>,

    /// Path of the AppImage to create
    #[arg(short = 'o', long, value_name = "PATH", env = "APPIMAGE_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Where appimagetool is cached
    #[arg(long, value_name = "DIR", env = "APPIMAGE_TOOL_DIR")]
    pub tool_dir: Option<PathBuf>,

    /// Download backend for appimagetool
    #[arg(long, value_enum, default_value_t = FetcherKind::Wget, env = "APPIMAGE_FETCHER")]
    pub fetcher: FetcherKind,

    /// Keep the staging directory after a successful build
    #[arg(long, env = "APPIMAGE_KEEP_APPDIR")]
    pub keep_appdir: bool,

    /// Only print errors
    #[arg(short, long, env = "APPIMAGE_QUIET")]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        for (flag, value) in [
            ("--product-name", &self.product_name),
            ("--app-id", &self.app_id),
            ("--binary", &self.binary),
            ("--icon-size", &self.icon_size),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(format!("{flag} cannot be empty"));
            }
        }

        if let Some(size) = &self.icon_size {
            if !is_icon_size(size) {
                return Err(format!(
                    "Invalid icon size: {size}. Expected WIDTHxHEIGHT, e.g. 256x256"
                ));
            }
        }

        Ok(())
    }
}

fn is_icon_size(size: &str) -> bool {
    match size.split_once('x') {
        Some((w, h)) => {
            !w.is_empty()
                && !h.is_empty()
                && w.bytes().all(|b| b.is_ascii_digit())
                && h.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["package_appimage"]).unwrap();
        assert_eq!(args.project_dir, PathBuf::from("."));
        assert_eq!(args.fetcher, FetcherKind::Wget);
        assert!(args.product_name.is_none());
        assert!(!args.keep_appdir);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn flags_parse() {
        let args = Args::try_parse_from([
            "package_appimage",
            "-C",
            "/work",
            "-n",
            "Calcurus",
            "--fetcher",
            "http",
            "--icon-size",
            "256x256",
            "-o",
            "dist/Calcurus.AppImage",
            "--keep-appdir",
        ])
        .unwrap();

        assert_eq!(args.project_dir, PathBuf::from("/work"));
        assert_eq!(args.product_name.as_deref(), Some("Calcurus"));
        assert_eq!(args.fetcher, FetcherKind::Http);
        assert_eq!(args.output, Some(PathBuf::from("dist/Calcurus.AppImage")));
        assert!(args.keep_appdir);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn unknown_fetcher_is_rejected() {
        assert!(Args::try_parse_from(["package_appimage", "--fetcher", "curl"]).is_err());
    }

    #[test]
    fn validation_catches_bad_values() {
        let args = Args::try_parse_from(["package_appimage", "--product-name", " "]).unwrap();
        assert!(args.validate().unwrap_err().contains("--product-name"));

        let args = Args::try_parse_from(["package_appimage", "--icon-size", "big"]).unwrap();
        assert!(args.validate().unwrap_err().contains("Invalid icon size"));
    }

    #[test]
    fn icon_sizes() {
        assert!(is_icon_size("4000x4000"));
        assert!(is_icon_size("16x16"));
        assert!(!is_icon_size("scalable"));
        assert!(!is_icon_size("x16"));
        assert!(!is_icon_size("16x"));
    }
}
