use crate::catalog::Catalog;
use crate::config::{CONFIG_FILE, DEFAULT_CATALOG_FILE, NetworkConfig};
use crate::error::NetworkError;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub fn handle_init(cwd: &Path, force: bool) -> Result<()> {
    let config_path = cwd.join(CONFIG_FILE);
    let catalog_path = cwd.join(DEFAULT_CATALOG_FILE);

    if config_path.exists() && !force {
        return Err(NetworkError::AlreadyInitialized(config_path.display().to_string()).into());
    }

    let mut config = NetworkConfig::default();
    config.network.catalog = Some(DEFAULT_CATALOG_FILE.to_string());
    config.save(&config_path)?;

    if catalog_path.exists() && !force {
        tracing::debug!(path = %catalog_path.display(), "Keeping existing catalog");
    } else {
        Catalog::builtin().save(&catalog_path)?;
    }

    println!(
        "{} pattern-network project in {}",
        "Initialized".green(),
        cwd.display()
    );
    println!("  Config:  {}", config_path.display());
    println!("  Catalog: {}", catalog_path.display());
    println!("  Output:  {}", config.output_dir(cwd).display());

    Ok(())
}
