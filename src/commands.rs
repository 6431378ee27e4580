use std::path::{Path, PathBuf};

use crate::config::{Config, base_path_from_config};

pub mod ingest;
pub mod init;
pub mod list;
pub mod render;
pub mod serve;

/// Load the config and the base path its relative directories resolve against.
async fn load_config(config_file: Option<&Path>) -> Result<(Config, PathBuf), anyhow::Error> {
    let (config, config_path) = Config::load_from_arg(config_file).await?;
    if config_path.exists() {
        tracing::debug!(path = %config_path.display(), "loaded config");
    } else {
        tracing::info!(path = %config_path.display(), "config file not found, using defaults");
    }
    Ok((config, base_path_from_config(&config_path)))
}
