//! AppImage packager - turns a prebuilt Linux binary into a single-file AppImage.
//!
//! Exit code 0 means appimagetool reported success; any fatal step exits 1.

use appimage_packager::cli::{self, OutputManager};
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging; step progress is logged at info
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            let _ = OutputManager::new(false).error(&e.to_string());
            1
        }
    };

    process::exit(exit_code);
}
