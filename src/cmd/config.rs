//! Configuration commands — `teamctl config`.

use std::path::Path;

use anyhow::Result;

use super::super::ConfigCommands;
use teamctl::config::{ClientConfig, config_path};

pub fn cmd_config(state_dir: &Path, command: Option<ConfigCommands>) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => {
            let path = config_path(state_dir);
            println!();
            println!("teamctl configuration");
            println!("=====================");
            println!();
            if path.exists() {
                println!("Config file: {}", path.display());
            } else {
                println!("No config file at {} (using defaults).", path.display());
                println!("Run 'teamctl config init' to create one.");
            }
            println!();

            let config = ClientConfig::load(state_dir)?;
            println!("Effective values (with env/CLI overrides):");
            println!("  api_url = \"{}\"", config.server.api_url);
            println!("  submit_url = \"{}\"", config.server.submit_url);
            println!();
        }
        Some(ConfigCommands::Init) => {
            let path = ClientConfig::write_default(state_dir)?;
            println!("Created {}", path.display());
        }
    }
    Ok(())
}
