//! Platform guard and platform-specific bundlers.

mod host;
pub mod linux;

pub use host::HostInfo;
