//! The article rendering pipeline.
//!
//! Raw article text flows through:
//! 1. Paragraph formatting (blank lines become `<p>` boundaries)
//! 2. Placeholder expansion (`*name,WxH,_,align*` becomes an `<img>`)
//! 3. Page templating (Tera, with the `ad_unit` function available)

pub mod ads;
mod article;
mod images;
mod pages;
mod paragraphs;
pub mod render;
mod store;

pub use pages::{Site, SiteError};
pub use store::StoreError;
