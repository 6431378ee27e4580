//! Text generation with ordered model fallback.

/// Errors from a generative text service.
#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error("request to model '{model}' failed: {source}")]
    Transport {
        model: String,
        source: reqwest::Error,
    },

    #[error("model '{model}' returned status {status}: {body}")]
    Status {
        model: String,
        status: u16,
        body: String,
    },

    #[error("model '{model}' returned no text")]
    Empty { model: String },

    #[error("no models configured")]
    NoModels,

    #[error("all models failed: {}", summarize(.0))]
    Exhausted(Vec<GenerateError>),
}

fn summarize(failures: &[GenerateError]) -> String {
    failures
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A service that turns a prompt into text using a named model.
pub trait TextGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerateError>;
}

/// Try each model in order until one returns non-empty text.
///
/// Returns the model that answered along with its text. Fails only after
/// every candidate has failed, carrying each candidate's error.
pub async fn generate_with_fallback<G: TextGenerator>(
    generator: &G,
    models: &[String],
    prompt: &str,
) -> Result<(String, String), GenerateError> {
    if models.is_empty() {
        return Err(GenerateError::NoModels);
    }

    let mut failures = Vec::new();
    for model in models {
        match generator.generate(model, prompt).await {
            Ok(text) if !text.trim().is_empty() => return Ok((model.clone(), text)),
            Ok(_) => failures.push(GenerateError::Empty {
                model: model.clone(),
            }),
            Err(e) => {
                tracing::warn!(%model, error = %e, "model failed, trying next candidate");
                failures.push(e);
            }
        }
    }

    Err(GenerateError::Exhausted(failures))
}
