//! AppDir staging tree.
//!
//! Layout produced for product `Calcurus` (app id `calcurus`):
//!
//! ```text
//! AppDir/
//! ├── AppRun
//! ├── calcurus.desktop
//! ├── calcurus.png
//! └── usr/
//!     ├── bin/Calcurus
//!     └── share/
//!         ├── applications/calcurus.desktop
//!         └── icons/hicolor/
//!             ├── 4000x4000/apps/calcurus.png
//!             └── scalable/apps/calcurus.svg
//! ```

use crate::bundler::{Result, Settings, utils::fs};
use std::path::PathBuf;

/// One copy performed while staging.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FileMapping {
    /// File that must exist before the run.
    pub source: PathBuf,
    /// Target file, or an existing directory to copy into.
    pub destination: PathBuf,
}

impl FileMapping {
    fn new(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            source,
            destination,
        }
    }
}

fn raster_icon_dir(settings: &Settings) -> PathBuf {
    PathBuf::from("usr/share/icons/hicolor")
        .join(settings.icon_size())
        .join("apps")
}

const SCALABLE_ICON_DIR: &str = "usr/share/icons/hicolor/scalable/apps";

/// Directories created before any file is copied.
pub fn skeleton(settings: &Settings) -> Vec<PathBuf> {
    let app_dir = settings.app_dir();
    vec![
        app_dir.join("usr/bin"),
        app_dir.join("usr/share/applications"),
        app_dir.join(raster_icon_dir(settings)),
        app_dir.join(SCALABLE_ICON_DIR),
    ]
}

/// The copy table, in the order copies are performed.
pub fn file_mappings(settings: &Settings) -> Vec<FileMapping> {
    let app_dir = settings.app_dir();
    let resources = settings.resources_dir();
    let id = settings.app_id();

    let desktop = resources.join(format!("{id}.desktop"));
    let png = resources
        .join("icons/hicolor")
        .join(settings.icon_size())
        .join("apps")
        .join(format!("{id}.png"));
    let svg = resources
        .join("icons/hicolor/scalable/apps")
        .join(format!("{id}.svg"));

    vec![
        FileMapping::new(settings.binary_path(), app_dir.join("usr/bin")),
        FileMapping::new(resources.join("AppRun"), app_dir.join("AppRun")),
        FileMapping::new(desktop.clone(), app_dir.join(format!("{id}.desktop"))),
        FileMapping::new(desktop, app_dir.join("usr/share/applications")),
        FileMapping::new(png.clone(), app_dir.join(format!("{id}.png"))),
        FileMapping::new(
            png,
            app_dir
                .join(raster_icon_dir(settings))
                .join(format!("{id}.png")),
        ),
        FileMapping::new(
            svg,
            app_dir.join(SCALABLE_ICON_DIR).join(format!("{id}.svg")),
        ),
    ]
}

/// Files that get mode 0755 once copying is done.
pub fn executables(settings: &Settings) -> [PathBuf; 2] {
    let app_dir = settings.app_dir();
    [
        app_dir.join("AppRun"),
        app_dir.join("usr/bin").join(settings.binary_name()),
    ]
}

/// Builds the staging tree.
///
/// Stops at the first missing source, leaving whatever was already copied.
pub async fn stage_app_dir(settings: &Settings) -> Result<()> {
    log::info!("Creating AppDir structure...");
    for dir in skeleton(settings) {
        fs::create_dir_all(&dir).await?;
    }

    log::info!("Copying files...");
    for mapping in file_mappings(settings) {
        let written = fs::copy_file(&mapping.source, &mapping.destination).await?;
        log::debug!("{} -> {}", mapping.source.display(), written.display());
    }

    for path in executables(settings) {
        fs::set_executable(&path).await?;
    }

    Ok(())
}
