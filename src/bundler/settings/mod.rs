//! Configuration structures for packaging runs.
//!
//! [`Settings`] is the resolved view of one run; [`SettingsBuilder`] applies
//! defaults and validation; [`Arch`] is the host architecture the run targets.

mod arch;
mod builder;
mod core;

pub use arch::Arch;
pub use builder::SettingsBuilder;
pub use self::core::{DEFAULT_ICON_SIZE, Settings};
