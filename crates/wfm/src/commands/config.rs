//! Configuration commands.

use anyhow::{Result, bail};
use colored::Colorize;
use tracing::debug;

use crate::cli::{ConfigAction, ConfigCommand};
use crate::config::Config;

pub fn execute(cmd: ConfigCommand, config: &Config) -> Result<()> {
    match cmd.action {
        ConfigAction::Show => {
            print!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", Config::config_path().display());
            Ok(())
        }
        ConfigAction::Init { force } => {
            let path = Config::config_path();
            if path.exists() && !force {
                bail!("Config file already exists at {:?} (use --force to overwrite)", path);
            }
            Config::default().save_to(&path)?;
            debug!("Wrote default config to {:?}", path);
            println!("{} Wrote {}", "✓".green(), path.display());
            Ok(())
        }
    }
}
