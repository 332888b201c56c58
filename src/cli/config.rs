//! `taskdeck config` subcommands implementation

use anyhow::Result;
use clap::Subcommand;

use crate::config::{get_app_dir, save_config, Config};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Save the backend root URL
    SetUri {
        /// Backend root URL, e.g. http://localhost:8080
        uri: String,
    },
}

pub async fn run(command: ConfigCommands, api_uri: Option<&str>) -> Result<()> {
    match command {
        ConfigCommands::Show => show(api_uri),
        ConfigCommands::SetUri { uri } => set_uri(&uri),
    }
}

fn show(api_uri: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    println!("Config file: {}", get_app_dir()?.join("config.toml").display());
    println!("API URI:     {}", config.api_uri(api_uri));
    println!("Tasks URL:   {}", config.tasks_url(api_uri));
    Ok(())
}

fn set_uri(uri: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.api.uri = uri.trim().trim_end_matches('/').to_string();
    save_config(&config)?;
    println!("✓ API URI set to {}", config.api.uri);
    Ok(())
}
