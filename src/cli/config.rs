//! `doccheck config` - inspect or create configuration

use crate::models::config::PROJECT_CONFIG_FILE;
use crate::models::DocCheckConfig;
use crate::Result;
use clap::Subcommand;
use colored::Colorize;
use std::path::Path;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the resolved configuration
    Show,

    /// Write a default doccheck.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

pub fn run(cmd: ConfigCommands, config: DocCheckConfig, project_root: &Path) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            print!("{}", config.to_toml()?);
        }
        ConfigCommands::Init { force } => {
            let path = init(project_root, force)?;
            println!("{}", format!("✓ Wrote {}", path.display()).green());
        }
    }
    Ok(())
}

/// Write the default project config, refusing to clobber an existing one unless forced
pub fn init(project_root: &Path, force: bool) -> Result<std::path::PathBuf> {
    let path = DocCheckConfig::project_config_path(project_root);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            PROJECT_CONFIG_FILE
        );
    }
    DocCheckConfig::default().save(&path)?;
    Ok(path)
}
