//! Command-line interface

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::*;
pub use handlers::*;
