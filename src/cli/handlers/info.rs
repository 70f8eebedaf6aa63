//! Configuration display

use crate::AppConfig;
use crate::Result;

/// Print the effective configuration as TOML
pub fn handle_config_command(config: &AppConfig) -> Result<()> {
    println!("📋 Effective configuration\n");
    println!("{}", config.to_toml_string()?);
    Ok(())
}
