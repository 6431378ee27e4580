use std::path::Path;

use crate::config::{Config, RoutesConfig};

use super::article::render_article;
use super::images::ImageResolver;
use super::render::{ArticleContext, ArticleLink, IndexContext, PageRenderer, RenderError, SiteContext};
use super::store::{Article, ArticleStore, StoreError};

#[derive(thiserror::Error, Debug)]
pub enum SiteError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

/// Everything needed to serve pages: articles, images and templates.
///
/// Holds no per-request state; every call reads the filesystem afresh.
pub struct Site {
    site: SiteContext,
    routes: RoutesConfig,
    store: ArticleStore,
    images: ImageResolver,
    renderer: PageRenderer,
}

impl Site {
    /// Build a site from config, resolving directories against `base_path`.
    pub fn from_config(config: &Config, base_path: &Path) -> Result<Self, SiteError> {
        let templates = config.site.templates_path(base_path);
        let renderer = PageRenderer::new(templates.as_deref())?;
        Ok(Self::with_renderer(config, base_path, renderer))
    }

    pub fn with_renderer(config: &Config, base_path: &Path, renderer: PageRenderer) -> Self {
        Self {
            site: SiteContext {
                name: config.site.name.clone(),
            },
            routes: config.routes.clone(),
            store: ArticleStore::new(
                config.site.articles_path(base_path),
                &config.site.article_extension,
            ),
            images: ImageResolver::new(config.site.images_path(base_path), config.routes.clone()),
            renderer,
        }
    }

    pub fn store(&self) -> &ArticleStore {
        &self.store
    }

    pub fn images(&self) -> &ImageResolver {
        &self.images
    }

    pub fn routes(&self) -> &RoutesConfig {
        &self.routes
    }

    /// Render an article's body (no page chrome).
    pub fn article_content(&self, slug: &str) -> Result<(Article, String), SiteError> {
        let article = self.store.load(slug)?;
        let content = render_article(&article.raw, &self.images);
        Ok((article, content))
    }

    /// The full home page.
    pub fn index_page(&self) -> Result<String, SiteError> {
        let articles = self
            .store
            .list()?
            .into_iter()
            .map(|slug| self.link(&slug))
            .collect();

        Ok(self.renderer.render_index(&IndexContext {
            site: self.site.clone(),
            articles,
        })?)
    }

    /// The full page for one article.
    pub fn article_page(&self, slug: &str) -> Result<String, SiteError> {
        let (article, content) = self.article_content(slug)?;

        Ok(self.renderer.render_article(&ArticleContext {
            site: self.site.clone(),
            article: self.link(&article.slug),
            content,
        })?)
    }

    fn link(&self, slug: &str) -> ArticleLink {
        ArticleLink {
            slug: slug.to_string(),
            title: crate::util::title_case(slug),
            url: self.routes.article_url(slug),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::ads::AdUnitFunction;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fixture() -> (tempfile::TempDir, Site) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("news")).unwrap();
        std::fs::create_dir_all(dir.path().join("tuits/images")).unwrap();

        let renderer =
            PageRenderer::with_ads(None, AdUnitFunction::with_rng(StdRng::seed_from_u64(5)))
                .unwrap();
        let site = Site::with_renderer(&Config::default(), dir.path(), renderer);
        (dir, site)
    }

    #[test]
    fn test_index_page() {
        let (dir, site) = fixture();
        std::fs::write(dir.path().join("news/news_tuit_1.txt"), "Body").unwrap();

        let html = site.index_page().unwrap();
        assert!(html.contains(r#"href="/article/news_tuit_1""#));
        assert!(html.contains("News Tuit 1"));
    }

    #[test]
    fn test_index_page_missing_directory() {
        let (dir, site) = fixture();
        std::fs::remove_dir(dir.path().join("news")).unwrap();

        let result = site.index_page();
        assert!(matches!(
            result,
            Err(SiteError::Store(StoreError::DirectoryMissing(_)))
        ));
    }

    #[test]
    fn test_article_page_with_image() {
        let (dir, site) = fixture();
        std::fs::write(dir.path().join("tuits/images/foo.png"), b"img").unwrap();
        std::fs::write(
            dir.path().join("news/storm.txt"),
            "Storm warning\n\n*foo,200x100,_,left*\n\nStay inside.",
        )
        .unwrap();

        let html = site.article_page("storm").unwrap();
        assert!(html.contains("<h1>Storm</h1>"));
        assert!(html.contains("<p>Storm warning</p>"));
        assert!(html.contains(r#"width="200""#));
        assert!(html.contains(r#"class="align-left""#));
        assert!(html.contains("<p>Stay inside.</p>"));
    }

    #[test]
    fn test_article_page_not_found() {
        let (_dir, site) = fixture();
        assert!(matches!(
            site.article_page("missing"),
            Err(SiteError::Store(StoreError::NotFound(_)))
        ));
    }
}
