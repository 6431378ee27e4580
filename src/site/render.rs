use std::path::Path;

use rand::RngCore;
use serde::Serialize;
use tera::{Context, Tera};

use super::ads::AdUnitFunction;

const INDEX_TEMPLATE: &str = "index.html";
const ARTICLE_TEMPLATE: &str = "article.html";

/// Templates compiled into the binary, used when no templates directory is configured.
const BUILTIN_TEMPLATES: [(&str, &str); 3] = [
    ("base.html", include_str!("../../templates/base.html")),
    (INDEX_TEMPLATE, include_str!("../../templates/index.html")),
    (ARTICLE_TEMPLATE, include_str!("../../templates/article.html")),
];

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("templates directory not found: {0}")]
    TemplatesNotFound(String),

    #[error("template '{0}' is missing from the templates directory")]
    MissingTemplate(&'static str),
}

/// The page renderer, wrapping Tera.
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    /// Load templates from `templates_dir`, or the built-in set when `None`.
    pub fn new(templates_dir: Option<&Path>) -> Result<Self, RenderError> {
        Self::with_ads(templates_dir, AdUnitFunction::from_entropy())
    }

    /// Like `new`, with a caller-supplied `ad_unit` function.
    pub fn with_ads<R>(
        templates_dir: Option<&Path>,
        ads: AdUnitFunction<R>,
    ) -> Result<Self, RenderError>
    where
        R: RngCore + Send + 'static,
    {
        let mut tera = match templates_dir {
            Some(dir) => load_templates(dir)?,
            None => {
                let mut tera = Tera::default();
                tera.add_raw_templates(BUILTIN_TEMPLATES)?;
                tera
            }
        };
        tera.register_function("ad_unit", ads);

        Ok(Self { tera })
    }

    /// Render the home page listing.
    pub fn render_index(&self, context: &IndexContext) -> Result<String, RenderError> {
        let mut tera_context = Context::new();
        tera_context.insert("site", &context.site);
        tera_context.insert("articles", &context.articles);

        Ok(self.tera.render(INDEX_TEMPLATE, &tera_context)?)
    }

    /// Render an article page around already-rendered HTML content.
    pub fn render_article(&self, context: &ArticleContext) -> Result<String, RenderError> {
        let mut tera_context = Context::new();
        tera_context.insert("site", &context.site);
        tera_context.insert("article", &context.article);
        tera_context.insert("content", &context.content);

        Ok(self.tera.render(ARTICLE_TEMPLATE, &tera_context)?)
    }
}

fn load_templates(dir: &Path) -> Result<Tera, RenderError> {
    if !dir.is_dir() {
        return Err(RenderError::TemplatesNotFound(dir.display().to_string()));
    }

    let glob = dir.join("**/*.html");
    let tera = Tera::new(&glob.to_string_lossy())?;

    let names: Vec<&str> = tera.get_template_names().collect();
    for required in [INDEX_TEMPLATE, ARTICLE_TEMPLATE] {
        if !names.contains(&required) {
            return Err(RenderError::MissingTemplate(required));
        }
    }

    Ok(tera)
}

/// Context passed to the home page template.
#[derive(Debug, Serialize)]
pub struct IndexContext {
    pub site: SiteContext,
    pub articles: Vec<ArticleLink>,
}

/// Context passed to the article template.
#[derive(Debug, Serialize)]
pub struct ArticleContext {
    pub site: SiteContext,
    pub article: ArticleLink,
    /// Rendered article body, inserted unescaped
    pub content: String,
}

/// Site-level information.
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub name: String,
}

/// An article as seen by templates.
#[derive(Debug, Clone, Serialize)]
pub struct ArticleLink {
    pub slug: String,
    pub title: String,
    pub url: String,
}
