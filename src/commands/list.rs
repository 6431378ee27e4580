use crate::{ListArgs, site::Site};

pub async fn run(args: &ListArgs) -> Result<(), anyhow::Error> {
    let (config, base_path) = super::load_config(args.config_file.as_deref()).await?;
    let site = Site::from_config(&config, &base_path)?;

    let slugs = site.store().list()?;
    if slugs.is_empty() {
        println!("No articles in {}", site.store().dir().display());
        return Ok(());
    }

    for slug in slugs {
        println!("{}  {}", slug, site.routes().article_url(&slug));
    }

    Ok(())
}
