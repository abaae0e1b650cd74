//! Configuration management commands

use crate::config::ConfigFile;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show config file path
    Path,

    /// Show current config
    Show,

    /// Store the authorization header in the config file
    SetAuth {
        /// Authorization header value
        value: String,
    },
}

pub fn handle(action: &ConfigCommands, path: Option<&Path>) -> anyhow::Result<()> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(ConfigFile::default_path);

    match action {
        ConfigCommands::Path => {
            println!("{}", path.display());
        }

        ConfigCommands::Show => {
            if path.exists() {
                let content = std::fs::read_to_string(&path)?;
                println!("# {}\n", path.display());
                println!("{}", content);
            } else {
                println!("No config file found at: {}", path.display());
                println!("\nCreate one with:");
                println!("  flashblock config set-auth YOUR_TOKEN");
            }
        }

        ConfigCommands::SetAuth { value } => {
            let mut config = if path.exists() {
                ConfigFile::load(&path)?
            } else {
                ConfigFile::default()
            };
            config.auth_header = Some(value.trim().to_string());
            config.save(&path)?;
            println!("Authorization header saved to {}", path.display());
        }
    }

    Ok(())
}
