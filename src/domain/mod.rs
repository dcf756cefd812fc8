//! Value types shared by the decision engine.
//!
//! Everything here is a small immutable struct or enum with no I/O. The
//! engine classifies and compares these values; it never mutates them.

pub mod tag;
pub mod version;

pub use tag::{TagClass, TagRecord};
pub use version::{ReleaseVersion, Version};
