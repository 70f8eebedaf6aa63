//! CLI command handlers
//!
//! - serve: HTTP server
//! - sync: one-shot foreground sync
//! - info: configuration display

pub mod info;
pub mod serve;
pub mod sync;

pub use info::*;
pub use serve::*;
pub use sync::*;
