use crate::{
    IngestArgs,
    ingest::{GeminiClient, IngestError, Ingestor},
};

pub async fn run(args: &IngestArgs) -> Result<(), anyhow::Error> {
    let (config, base_path) = super::load_config(args.config_file.as_deref()).await?;

    if args.dry_run {
        // No key needed: nothing is sent to the service
        let ingestor = Ingestor::from_config(
            &config,
            &base_path,
            GeminiClient::new(&config.ingest.endpoint, String::new()),
        );
        let pending = ingestor.pending()?;
        for path in &pending {
            println!("Would generate an article from {}", path.display());
        }
        println!(
            "{} record(s) pending, output in {}",
            pending.len(),
            ingestor.output_dir().display()
        );
        return Ok(());
    }

    let api_key = std::env::var(&config.ingest.api_key_env)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| IngestError::MissingApiKey(config.ingest.api_key_env.clone()))?;

    let client = GeminiClient::new(&config.ingest.endpoint, api_key);
    let ingestor = Ingestor::from_config(&config, &base_path, client);
    let report = ingestor.run().await?;

    println!(
        "Processed {} record(s): {} generated, {} skipped, {} failed",
        report.discovered, report.generated, report.skipped, report.failed
    );

    Ok(())
}
