use anyhow::{Context, Result};
use spotless_applier_core::{Config, config::CONFIG_FILE_NAMES};
use std::env;
use std::path::PathBuf;

use crate::cli::ProjectArgs;

pub fn init_command(args: &ProjectArgs, force: bool) -> Result<()> {
    // Determine the project root
    let project_root = match args.project {
        Some(ref dir) => dir.clone(),
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let project_root: PathBuf = project_root
        .canonicalize()
        .context("Failed to canonicalize project root")?;

    let config_path = project_root.join(CONFIG_FILE_NAMES[0]);
    if config_path.exists() && !force {
        println!("❌ Config already exists at: {}", config_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    Config::default()
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!("✅ Created config: {}", config_path.display());
    Ok(())
}
