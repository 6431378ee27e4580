//! Configuration loading from files and the environment.

use std::path::{Path, PathBuf};

use super::{Config, ConfigError};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "newsdesk.yaml";

/// Prefix for environment overrides, e.g. `NEWSDESK__SITE__NAME`.
const ENV_PREFIX: &str = "NEWSDESK";

impl Config {
    /// Load the config from the command line argument, defaulting to `newsdesk.yaml`.
    ///
    /// Returns the config together with the absolute path it was looked up at.
    pub async fn load_from_arg(config_file: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_file = config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        let config = Self::load_from_file(&config_file).await?;
        Ok((config, config_file))
    }

    /// Load the config from a file path.
    ///
    /// A missing file is not an error: every setting has a default.
    pub(crate) async fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let path_str = path
            .as_os_str()
            .to_str()
            .ok_or_else(|| ConfigError::EncodePath(path.to_path_buf()))?;

        let config = config::Config::builder()
            .add_source(config::File::new(path_str, config::FileFormat::Yaml).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Config>()?;

        config.validate()?;
        Ok(config)
    }
}

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
