//! API server handlers

use crate::cli::output::*;
use crate::AppConfig;
use crate::Result;

/// Start the HTTP server; CLI flags win over the `[server]` table
pub async fn handle_serve_command(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
    cors: bool,
) -> Result<()> {
    use crate::api::serve_api;

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    let cors = cors || config.server.enable_cors;

    println!("🚀 Starting Token Icon Server");
    println!("=============================\n");
    println!("📍 Host: {host}");
    println!("🔌 Port: {port}");
    println!("🌐 CORS: {}", if cors { "Enabled" } else { "Disabled" });
    println!("⏱️  Sync cooldown: {}ms", config.sync.cooldown_ms);
    println!();

    print_info("Press Ctrl+C to stop");
    serve_api(config, host, port, cors).await
}
