//! Batch conversion of source posts into article files.
//!
//! Every `*.json` record in the source directory becomes at most one
//! `<prefix><stem>.<ext>` file in the output directory. Records whose output
//! already exists are skipped without calling the service, and a failing
//! record is logged and counted without stopping the batch.

mod gemini;
mod generator;
mod record;

use std::path::{Path, PathBuf};
use std::time::Duration;

use tera::{Context, Tera};
use tokio::io::{AsyncWrite, AsyncWriteExt};

pub use gemini::GeminiClient;
pub use generator::{GenerateError, TextGenerator, generate_with_fallback};
pub use record::{SourceRecord, discover_records, record_name};

use crate::config::Config;

/// Used when the config has no `ingest.prompt`.
const DEFAULT_PROMPT: &str = r#"You are a digital news writer.
Here is a raw post taken from a social network:

"{{ text }}"

Your task:
1. Analyse the content.
2. Write a short news story: a title line, a blank line, then at most two paragraphs.
3. Keep an informative, neutral tone and write in the same language as the post.
4. If the post is irrelevant or spam, reply only with "IRRELEVANT".
"#;

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("failed to read source directory {path}: {source}")]
    ReadSourceDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("record file name is not valid unicode: {0}")]
    RecordName(PathBuf),

    #[error("failed to read record {path}: {source}")]
    ReadRecord {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse record {path}: {source}")]
    ParseRecord {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to build prompt: {0}")]
    Prompt(#[from] tera::Error),

    #[error("generation failed: {0}")]
    Generate(#[from] GenerateError),

    #[error("failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write article {path}: {source}")]
    WriteArticle {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("API key not found: set the {0} environment variable")]
    MissingApiKey(String),
}

// =============================================================================
// Batch runner
// =============================================================================

/// Counts from one batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub discovered: usize,
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
}

enum Outcome {
    Generated(PathBuf),
    Skipped,
}

pub struct Ingestor<G> {
    generator: G,
    source_dir: PathBuf,
    output_dir: PathBuf,
    output_prefix: String,
    extension: String,
    models: Vec<String>,
    delay: Duration,
    prompt: String,
}

impl<G: TextGenerator> Ingestor<G> {
    pub fn from_config(config: &Config, base_path: &Path, generator: G) -> Self {
        Self {
            generator,
            source_dir: config.ingest.source_path(base_path),
            output_dir: config.ingest.output_path(&config.site, base_path),
            output_prefix: config.ingest.output_prefix.clone(),
            extension: config.site.article_extension.trim_start_matches('.').to_string(),
            models: config
                .ingest
                .models
                .iter()
                .filter(|m| !m.trim().is_empty())
                .cloned()
                .collect(),
            delay: Duration::from_millis(config.ingest.delay_ms),
            prompt: config
                .ingest
                .prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Output path for a record stem.
    pub fn output_path_for(&self, name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}{}.{}", self.output_prefix, name, self.extension))
    }

    /// Records that have no article yet, without calling the service.
    pub fn pending(&self) -> Result<Vec<PathBuf>, IngestError> {
        Ok(discover_records(&self.source_dir)?
            .into_iter()
            .filter(|path| {
                record_name(path).map_or(true, |name| !self.output_path_for(name).exists())
            })
            .collect())
    }

    /// Process every record in the source directory.
    pub async fn run(&self) -> Result<IngestReport, IngestError> {
        let records = discover_records(&self.source_dir)?;
        let mut report = IngestReport {
            discovered: records.len(),
            ..Default::default()
        };
        tracing::info!(
            count = records.len(),
            dir = %self.source_dir.display(),
            "found source records"
        );

        if records.is_empty() {
            return Ok(report);
        }

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| IngestError::CreateOutputDir {
                path: self.output_dir.clone(),
                source: e,
            })?;

        let mut called_service = false;
        for path in &records {
            if called_service && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            match self.process(path, &mut called_service).await {
                Ok(Outcome::Generated(output)) => {
                    tracing::info!(record = %path.display(), article = %output.display(), "article written");
                    report.generated += 1;
                }
                Ok(Outcome::Skipped) => {
                    tracing::debug!(record = %path.display(), "article exists, skipping");
                    report.skipped += 1;
                }
                Err(e) => {
                    tracing::warn!(record = %path.display(), error = %e, "failed to process record");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            generated = report.generated,
            skipped = report.skipped,
            failed = report.failed,
            "ingestion finished"
        );
        Ok(report)
    }

    async fn process(&self, path: &Path, called_service: &mut bool) -> Result<Outcome, IngestError> {
        // An existing article wins over an unreadable record
        let output = self.output_path_for(record_name(path)?);
        if output.exists() {
            return Ok(Outcome::Skipped);
        }

        let record = SourceRecord::load(path)?;

        let prompt = self.render_prompt(&record)?;
        *called_service = true;
        let (model, text) = generate_with_fallback(&self.generator, &self.models, &prompt).await?;
        tracing::debug!(%model, record = %record.name, "generated article text");

        // create_new keeps generation at-most-once even if another run got here first
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&output)
            .await;
        let file = match file {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(Outcome::Skipped),
            Err(e) => {
                return Err(IngestError::WriteArticle {
                    path: output,
                    source: e,
                });
            }
        };

        write_or_discard(file, &output, &text).await?;
        Ok(Outcome::Generated(output))
    }

    fn render_prompt(&self, record: &SourceRecord) -> Result<String, IngestError> {
        let mut context = Context::new();
        context.insert("text", &record.text);
        context.insert("name", &record.name);
        Ok(Tera::one_off(&self.prompt, &context, false)?)
    }
}

/// Write the whole article. On failure the file is removed, leaving no partial article.
async fn write_or_discard<W>(mut writer: W, output: &Path, text: &str) -> Result<(), IngestError>
where
    W: AsyncWrite + Unpin,
{
    let written: std::io::Result<()> = async {
        writer.write_all(text.as_bytes()).await?;
        writer.flush().await
    }
    .await;
    drop(writer);

    if let Err(source) = written {
        if let Err(e) = tokio::fs::remove_file(output).await {
            tracing::warn!(article = %output.display(), error = %e, "failed to remove partial article");
        }
        return Err(IngestError::WriteArticle {
            path: output.to_path_buf(),
            source,
        });
    }
    Ok(())
}
