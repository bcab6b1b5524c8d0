//! incdeps Core
//!
//! Core types, configuration and errors shared by the incdeps crates.

pub mod config;
pub mod error;
pub mod path;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
