//! Article files on disk.

use std::path::{Path, PathBuf};

use crate::util::{is_safe_slug, title_case};

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("articles directory does not exist: {0}")]
    DirectoryMissing(PathBuf),

    #[error("failed to read articles directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("article not found: {0}")]
    NotFound(String),

    #[error("failed to read article {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

// =============================================================================
// Articles
// =============================================================================

/// A loaded article. The HTML is derived on demand and never stored.
#[derive(Debug, Clone)]
pub struct Article {
    pub slug: String,
    pub raw: String,
}

impl Article {
    pub fn title(&self) -> String {
        title_case(&self.slug)
    }
}

/// A flat directory of `<slug>.<ext>` article files.
#[derive(Debug, Clone)]
pub struct ArticleStore {
    dir: PathBuf,
    extension: String,
}

impl ArticleStore {
    pub fn new(dir: PathBuf, extension: &str) -> Self {
        Self {
            dir,
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// List article slugs, sorted.
    ///
    /// A missing directory is an error rather than an empty list, so an
    /// empty site can be told apart from a misconfigured one.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::DirectoryMissing(self.dir.clone())
            } else {
                StoreError::ReadDir {
                    path: self.dir.clone(),
                    source: e,
                }
            }
        })?;

        let mut slugs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::ReadDir {
                path: self.dir.clone(),
                source: e,
            })?;

            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            // Only list what `load` will accept
            if let Some(slug) = path.file_stem().and_then(|s| s.to_str())
                && is_safe_slug(slug)
            {
                slugs.push(slug.to_string());
            }
        }

        slugs.sort();
        Ok(slugs)
    }

    /// Path of the file backing a slug, or `None` if the slug is unsafe.
    pub fn path_for(&self, slug: &str) -> Option<PathBuf> {
        is_safe_slug(slug).then(|| self.dir.join(format!("{slug}.{}", self.extension)))
    }

    /// Read one article.
    pub fn load(&self, slug: &str) -> Result<Article, StoreError> {
        let path = self
            .path_for(slug)
            .ok_or_else(|| StoreError::NotFound(slug.to_string()))?;

        if !path.is_file() {
            return Err(StoreError::NotFound(slug.to_string()));
        }

        let raw = std::fs::read_to_string(&path).map_err(|e| StoreError::Read {
            path: path.clone(),
            source: e,
        })?;

        Ok(Article {
            slug: slug.to_string(),
            raw,
        })
    }
}
