//! vf-core: shared errors, configuration, and media-domain enums.
//!
//! This crate is the foundational dependency for the other vf-* crates,
//! providing a unified error type, the configuration tree, and the small
//! enums used by filter parameters.

pub mod config;
pub mod error;
pub mod media;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use media::*;
