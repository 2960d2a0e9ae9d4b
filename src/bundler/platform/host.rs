//! Host identification and the platform guard.

use crate::bundler::{Arch, Error, Result, error::Context};

/// Operating system and machine identifiers of the packaging host.
///
/// Read from `uname(2)` on unix so the values match `uname -s` and `uname -m`.
/// Tests construct it directly to exercise the guard.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HostInfo {
    /// Kernel name, e.g. `Linux` or `Darwin`.
    pub os: String,
    /// Machine hardware name, e.g. `x86_64`.
    pub machine: String,
}

impl HostInfo {
    /// Creates host info from explicit identifiers.
    pub fn new(os: impl Into<String>, machine: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            machine: machine.into(),
        }
    }

    /// Reads the identifiers of the running host.
    #[cfg(unix)]
    pub fn detect() -> Result<Self> {
        let uts = nix::sys::utsname::uname().context("reading host identity via uname")?;
        Ok(Self {
            os: uts.sysname().to_string_lossy().into_owned(),
            machine: uts.machine().to_string_lossy().into_owned(),
        })
    }

    /// Reads the identifiers of the running host.
    #[cfg(not(unix))]
    pub fn detect() -> Result<Self> {
        Ok(Self::new(std::env::consts::OS, std::env::consts::ARCH))
    }

    /// Rejects anything but Linux, then resolves the architecture.
    pub fn check(&self) -> Result<Arch> {
        if !self.os.eq_ignore_ascii_case("linux") {
            return Err(Error::UnsupportedPlatform {
                os: self.os.clone(),
            });
        }
        Arch::from_machine(&self.machine)
    }
}
