//! Include Preprocessing
//!
//! Textual include scanning, header resolution and the memoized walk over
//! the include graph. Nothing here evaluates macros or real conditionals.

pub mod headers;
pub mod text;
pub mod walker;

pub use headers::HeaderResolver;
pub use text::IncludeScanner;
pub use walker::{IncludeWalker, WalkStats};
