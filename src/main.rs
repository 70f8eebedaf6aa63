use clap::Parser;
use token_icons::cli::Cli;
use token_icons::cli::Commands;
use token_icons::AppConfig;
use token_icons::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };

    // Initialize logging
    if cli.verbose {
        token_icons::logging::init_logging_with_level("debug")?;
    } else {
        token_icons::logging::init_logging_with_config(Some(&config))?;
    }
    tracing::debug!("Configuration loaded successfully");

    // Execute the requested command
    match cli.command {
        Commands::Serve { host, port, cors } => {
            token_icons::cli::handle_serve_command(&config, host, port, cors).await?;
        }
        Commands::Sync {
            network_id,
            timeout_secs,
        } => {
            token_icons::cli::handle_sync_command(&config, network_id, timeout_secs).await?;
        }
        Commands::Config => {
            token_icons::cli::handle_config_command(&config)?;
        }
    }

    Ok(())
}
