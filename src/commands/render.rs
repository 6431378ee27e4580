use crate::{RenderArgs, site::Site};

pub async fn run(args: &RenderArgs) -> Result<(), anyhow::Error> {
    let (config, base_path) = super::load_config(args.config_file.as_deref()).await?;
    let site = Site::from_config(&config, &base_path)?;

    let (article, content) = site.article_content(&args.slug)?;
    tracing::debug!(slug = %article.slug, title = %article.title(), "rendered article");
    println!("{content}");

    Ok(())
}
