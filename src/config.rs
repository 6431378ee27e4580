//! Configuration loading and types for newsdesk.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for config structures (`types`)
//! - Loading configs from files and the environment (`load`)

mod load;
mod types;

pub use load::{DEFAULT_CONFIG_FILE, base_path_from_config};
pub use types::{Config, RoutesConfig};

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to encode config file path as a unicode string: {0}")]
    EncodePath(std::path::PathBuf),

    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] config::ConfigError),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("{0}")]
    Validation(String),
}

// =============================================================================
// Validation
// =============================================================================

impl Config {
    /// Check the settings that defaults cannot make safe.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_route("routes.article", &self.routes.article)?;
        validate_route("routes.media", &self.routes.media)?;
        if self.routes.article == self.routes.media {
            return Err(ConfigError::Validation(format!(
                "invalid config: 'routes.article' and 'routes.media' must differ (both are '{}')",
                self.routes.article
            )));
        }

        let extension = self.site.article_extension.trim_start_matches('.');
        if extension.is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'site.article_extension' must not be empty".to_string(),
            ));
        }

        if self.ingest.models.iter().all(|m| m.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "invalid config: 'ingest.models' needs at least one model name\n\nExample:\n  ingest:\n    models:\n      - gemini-2.5-flash".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_route(field: &str, route: &str) -> Result<(), ConfigError> {
    if route.is_empty() || route.contains('/') {
        return Err(ConfigError::Validation(format!(
            "invalid config: '{field}' must be a single non-empty path segment, got '{route}'"
        )));
    }
    Ok(())
}
