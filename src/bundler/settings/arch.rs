//! CPU architecture types and utilities.

use crate::bundler::{Error, Result};
use std::fmt;

/// CPU architecture of the host packaging the AppImage.
///
/// Only architectures with a published appimagetool build are represented.
/// The tag returned by [`Arch::appimage_tag`] selects the tool download and is
/// passed to the tool as `ARCH`.
///
/// # Examples
///
/// ```
/// use appimage_packager::bundler::Arch;
///
/// let arch = Arch::from_machine("aarch64").unwrap();
/// assert_eq!(arch.appimage_tag(), "aarch64");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Arch {
    /// x86_64 / AMD64 (64-bit)
    X86_64,
    /// AArch64 / ARM64 (64-bit)
    AArch64,
}

impl Arch {
    /// Resolve a `uname -m` machine string.
    ///
    /// Matching is exact; aliases such as `amd64` or `arm64` are rejected.
    pub fn from_machine(machine: &str) -> Result<Self> {
        match machine {
            "x86_64" => Ok(Self::X86_64),
            "aarch64" => Ok(Self::AArch64),
            other => Err(Error::UnsupportedArch {
                arch: other.to_string(),
            }),
        }
    }

    /// Architecture tag understood by appimagetool.
    pub fn appimage_tag(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::AArch64 => "aarch64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.appimage_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_supported_machines() {
        assert_eq!(Arch::from_machine("x86_64").unwrap(), Arch::X86_64);
        assert_eq!(Arch::from_machine("aarch64").unwrap(), Arch::AArch64);
    }

    #[test]
    fn rejects_everything_else() {
        for machine in ["armv7l", "i686", "riscv64", "amd64", "arm64", ""] {
            match Arch::from_machine(machine) {
                Err(Error::UnsupportedArch { arch }) => assert_eq!(arch, machine),
                other => panic!("expected UnsupportedArch for {machine:?}, got {other:?}"),
            }
        }
    }
}
