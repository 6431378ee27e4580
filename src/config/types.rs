//! Configuration type definitions.
//!
//! This module contains all the data structures used in newsdesk configuration files.
//! These types are pure data - no I/O or complex logic.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::util::resolve_path;

// =============================================================================
// Root config
// =============================================================================

/// Root configuration. Every section is optional and falls back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

// =============================================================================
// Site configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Display name shown in page headers
    #[serde(default = "default_site_name")]
    pub name: String,
    /// Directory holding one text file per article
    #[serde(default = "default_articles_dir")]
    pub articles_dir: PathBuf,
    /// Extension (without dot) that marks a file as an article
    #[serde(default = "default_article_extension")]
    pub article_extension: String,
    /// Flat directory of images referenced by placeholders
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
    /// Custom templates directory; the built-in templates are used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
}

fn default_site_name() -> String {
    "Newsdesk".to_string()
}

fn default_articles_dir() -> PathBuf {
    PathBuf::from("news")
}

fn default_article_extension() -> String {
    "txt".to_string()
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("tuits/images")
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            articles_dir: default_articles_dir(),
            article_extension: default_article_extension(),
            images_dir: default_images_dir(),
            templates_dir: None,
        }
    }
}

impl SiteConfig {
    pub fn articles_path(&self, base_path: &Path) -> PathBuf {
        resolve_path(base_path, &self.articles_dir)
    }

    pub fn images_path(&self, base_path: &Path) -> PathBuf {
        resolve_path(base_path, &self.images_dir)
    }

    pub fn templates_path(&self, base_path: &Path) -> Option<PathBuf> {
        self.templates_dir
            .as_ref()
            .map(|dir| resolve_path(base_path, dir))
    }
}

// =============================================================================
// Route configuration
// =============================================================================

/// URL segments for article pages and media files.
///
/// `article: noticia` serves `/noticia/<slug>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_article_route")]
    pub article: String,
    #[serde(default = "default_media_route")]
    pub media: String,
}

fn default_article_route() -> String {
    "article".to_string()
}

fn default_media_route() -> String {
    "media".to_string()
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            article: default_article_route(),
            media: default_media_route(),
        }
    }
}

impl RoutesConfig {
    /// URL of an article page. The slug is percent-encoded.
    pub fn article_url(&self, slug: &str) -> String {
        format!("/{}/{}", self.article, urlencoding::encode(slug))
    }

    /// URL of a file in the images directory. The file name is percent-encoded.
    pub fn media_url(&self, file_name: &str) -> String {
        format!("/{}/{}", self.media, urlencoding::encode(file_name))
    }
}

// =============================================================================
// Ingestion configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Directory of `*.json` post records
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    /// Where generated articles are written (defaults to `site.articles_dir`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Prepended to the record's file stem to name the article
    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,
    /// Model names tried in order until one succeeds
    #[serde(default = "default_models")]
    pub models: Vec<String>,
    /// Environment variable holding the service API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Base URL of the generative language API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Pause between service calls
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Tera template for the prompt; `{{ text }}` is the post text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("tuits")
}

fn default_output_prefix() -> String {
    "news_".to_string()
}

fn default_models() -> Vec<String> {
    vec![
        "gemini-2.5-flash".to_string(),
        "gemini-2.0-flash".to_string(),
        "gemini-1.5-flash".to_string(),
    ]
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_delay_ms() -> u64 {
    2000
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            output_dir: None,
            output_prefix: default_output_prefix(),
            models: default_models(),
            api_key_env: default_api_key_env(),
            endpoint: default_endpoint(),
            delay_ms: default_delay_ms(),
            prompt: None,
        }
    }
}

impl IngestConfig {
    pub fn source_path(&self, base_path: &Path) -> PathBuf {
        resolve_path(base_path, &self.source_dir)
    }

    /// Output directory, falling back to the site's articles directory.
    pub fn output_path(&self, site: &SiteConfig, base_path: &Path) -> PathBuf {
        match &self.output_dir {
            Some(dir) => resolve_path(base_path, dir),
            None => site.articles_path(base_path),
        }
    }
}
