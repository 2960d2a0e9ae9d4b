//! Linux bundlers.

pub mod appimage;
