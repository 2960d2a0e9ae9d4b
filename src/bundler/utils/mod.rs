//! Shared helpers used by the packaging steps.

pub mod fs;
pub mod http;
