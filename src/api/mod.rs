//! HTTP surface: sync trigger/status endpoints and the icon server

pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod server;
pub mod types;

pub use handlers::AppState;
pub use server::build_app;
pub use server::serve_api;
