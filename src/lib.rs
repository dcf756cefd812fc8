pub mod aliases;
pub mod config;
pub mod domain;
pub mod error;
pub mod github;
pub mod grammar;
pub mod outputs;
pub mod router;
pub mod sequencer;
pub mod ui;

pub use error::{ReleaseTaggerError, Result};
