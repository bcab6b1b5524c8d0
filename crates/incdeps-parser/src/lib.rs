//! incdeps Parser
//!
//! Finds the headers each translation unit depends on.
//!
//! ## Modules
//!
//! - `preprocessor` - include scanning, header resolution and graph walking
//! - `sources` - source file discovery in the configured directories

pub mod preprocessor;
pub mod sources;

pub use preprocessor::{HeaderResolver, IncludeScanner, IncludeWalker, WalkStats};
pub use sources::SourceScanner;
