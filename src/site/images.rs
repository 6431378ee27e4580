//! Image placeholder resolution.
//!
//! A placeholder payload names an image by base filename and optionally
//! carries dimensions and an alignment:
//!
//! ```text
//! name[, WIDTHxHEIGHT[, unused, alignment]]
//! ```
//!
//! The image file is found by scanning a flat directory for `<name>.*`.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::RoutesConfig;

// =============================================================================
// Placeholder payload
// =============================================================================

/// Image alignment, rendered as an `align-*` CSS class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Right,
    Center,
}

impl Alignment {
    /// Parse case-insensitively. Unknown values fall back to `None`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "left" => Alignment::Left,
            "right" => Alignment::Right,
            "center" => Alignment::Center,
            _ => Alignment::None,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Alignment::None => "align-none",
            Alignment::Left => "align-left",
            Alignment::Right => "align-right",
            Alignment::Center => "align-center",
        }
    }
}

/// A width or height attribute value.
///
/// `Auto` only when the dimensions field has no `x`. Otherwise both halves
/// are kept verbatim, even when empty or not numeric.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Dimension {
    #[default]
    Auto,
    Value(String),
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Auto => f.write_str("auto"),
            Dimension::Value(v) => f.write_str(v),
        }
    }
}

/// A parsed image placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTag {
    pub name: String,
    pub width: Dimension,
    pub height: Dimension,
    pub alignment: Alignment,
}

impl ImageTag {
    /// Parse a placeholder payload. Returns `None` when the name is empty.
    ///
    /// Nothing here is an error: malformed dimensions become `auto`, a
    /// missing or unknown alignment becomes `none`, the third field is
    /// ignored and fields past the fourth are dropped.
    pub fn parse(payload: &str) -> Option<Self> {
        let fields: Vec<&str> = payload.split(',').map(str::trim).collect();

        let name = fields.first().copied().unwrap_or_default();
        if name.is_empty() {
            return None;
        }

        let (width, height) = fields
            .get(1)
            .and_then(|dims| dims.split_once('x'))
            .map(|(w, h)| (Dimension::Value(w.to_string()), Dimension::Value(h.to_string())))
            .unwrap_or_default();

        let alignment = fields
            .get(3)
            .map(|a| Alignment::parse(a))
            .unwrap_or_default();

        Some(Self {
            name: name.to_string(),
            width,
            height,
            alignment,
        })
    }
}

// =============================================================================
// Directory lookup
// =============================================================================

/// Outcome of looking up an image by base name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageLookup {
    /// File name (with extension) of the matching image
    Found(String),
    NotFound,
    DirectoryMissing,
    /// The directory exists but could not be listed
    Unreadable(String),
}

/// Resolves image placeholders against a directory of image files.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    images_dir: PathBuf,
    routes: RoutesConfig,
}

impl ImageResolver {
    pub fn new(images_dir: PathBuf, routes: RoutesConfig) -> Self {
        Self { images_dir, routes }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Find the file whose name starts with `<name>.`.
    ///
    /// The directory is scanned on every call. When several files share the
    /// prefix the lexicographically smallest name wins.
    pub fn lookup(&self, name: &str) -> ImageLookup {
        let entries = match std::fs::read_dir(&self.images_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return ImageLookup::DirectoryMissing;
            }
            Err(e) => {
                tracing::warn!(
                    dir = %self.images_dir.display(),
                    error = %e,
                    "cannot read images directory"
                );
                return ImageLookup::Unreadable(e.to_string());
            }
        };

        let prefix = format!("{name}.");
        entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|file_name| file_name.starts_with(&prefix))
            .min()
            .map(ImageLookup::Found)
            .unwrap_or(ImageLookup::NotFound)
    }

    /// Expand a placeholder payload into an `<img>` element or error markup.
    pub fn resolve(&self, payload: &str) -> String {
        let Some(tag) = ImageTag::parse(payload) else {
            return String::new();
        };

        match self.lookup(&tag.name) {
            ImageLookup::Found(file_name) => format!(
                r#"<img src="{src}" alt="{alt}" width="{width}" height="{height}" class="{class}">"#,
                src = self.routes.media_url(&file_name),
                alt = tag.name,
                width = tag.width,
                height = tag.height,
                class = tag.alignment.css_class(),
            ),
            ImageLookup::NotFound => {
                tracing::debug!(image = %tag.name, "image placeholder did not match a file");
                format!(
                    r#"<div class="image-error" style="color: red; padding: 10px; border: 1px dashed red;">ERROR: image "{}" was not found in {}</div>"#,
                    tag.name,
                    self.images_dir.display()
                )
            }
            ImageLookup::DirectoryMissing => format!(
                r#"<div class="image-error" style="color: red;">ERROR: the images directory does not exist: {}</div>"#,
                self.images_dir.display()
            ),
            ImageLookup::Unreadable(cause) => format!(
                r#"<div class="image-error" style="color: red;">ERROR: cannot read the images directory {}: {}</div>"#,
                self.images_dir.display(),
                cause
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver_with(files: &[&str]) -> (tempfile::TempDir, ImageResolver) {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            std::fs::write(dir.path().join(file), b"img").unwrap();
        }
        let resolver = ImageResolver::new(dir.path().to_path_buf(), RoutesConfig::default());
        (dir, resolver)
    }

    #[test]
    fn test_parse_full_payload() {
        let tag = ImageTag::parse("foo, 200x100, _, LEFT").unwrap();
        assert_eq!(tag.name, "foo");
        assert_eq!(tag.width, Dimension::Value("200".to_string()));
        assert_eq!(tag.height, Dimension::Value("100".to_string()));
        assert_eq!(tag.alignment, Alignment::Left);
    }

    #[test]
    fn test_parse_name_only() {
        let tag = ImageTag::parse("foo").unwrap();
        assert_eq!(tag.width, Dimension::Auto);
        assert_eq!(tag.height, Dimension::Auto);
        assert_eq!(tag.alignment, Alignment::None);
    }

    #[test]
    fn test_parse_empty_name() {
        assert_eq!(ImageTag::parse(""), None);
        assert_eq!(ImageTag::parse(" , 10x10"), None);
    }

    #[test]
    fn test_parse_dimensions_fallbacks() {
        // No separator
        let tag = ImageTag::parse("foo,200").unwrap();
        assert_eq!((tag.width, tag.height), (Dimension::Auto, Dimension::Auto));

        // Empty field
        let tag = ImageTag::parse("foo,,_,right").unwrap();
        assert_eq!((tag.width, tag.height), (Dimension::Auto, Dimension::Auto));
        assert_eq!(tag.alignment, Alignment::Right);

        // Split on the first `x` only, values are verbatim
        let tag = ImageTag::parse("foo,50%x2x3").unwrap();
        assert_eq!(tag.width, Dimension::Value("50%".to_string()));
        assert_eq!(tag.height, Dimension::Value("2x3".to_string()));
    }

    #[test]
    fn test_parse_dimension_halves_are_verbatim() {
        let tag = ImageTag::parse("foo,200x").unwrap();
        assert_eq!(tag.width, Dimension::Value("200".to_string()));
        assert_eq!(tag.height, Dimension::Value(String::new()));

        let tag = ImageTag::parse("foo,x120").unwrap();
        assert_eq!(tag.width, Dimension::Value(String::new()));
        assert_eq!(tag.height, Dimension::Value("120".to_string()));

        // Only the field as a whole is trimmed
        let tag = ImageTag::parse("foo, 200 x 100 ").unwrap();
        assert_eq!(tag.width, Dimension::Value("200 ".to_string()));
        assert_eq!(tag.height, Dimension::Value(" 100".to_string()));
    }

    #[test]
    fn test_resolve_empty_dimension_half() {
        let (_dir, resolver) = resolver_with(&["foo.png"]);
        let html = resolver.resolve("foo,200x");
        assert!(html.contains(r#"width="200" height="""#));
    }

    #[test]
    fn test_parse_unknown_alignment() {
        let tag = ImageTag::parse("foo,1x1,_,diagonal").unwrap();
        assert_eq!(tag.alignment, Alignment::None);
    }

    #[test]
    fn test_alignment_needs_fourth_field() {
        // The third field is reserved, so alignment there is ignored
        let tag = ImageTag::parse("foo,1x1,left").unwrap();
        assert_eq!(tag.alignment, Alignment::None);
    }

    #[test]
    fn test_resolve_with_dimensions_and_alignment() {
        let (_dir, resolver) = resolver_with(&["foo.png"]);
        let html = resolver.resolve("foo,200x100,_,left");

        assert!(html.starts_with("<img "));
        assert!(html.contains(r#"src="/media/foo.png""#));
        assert!(html.contains(r#"alt="foo""#));
        assert!(html.contains(r#"width="200""#));
        assert!(html.contains(r#"height="100""#));
        assert!(html.contains(r#"class="align-left""#));
    }

    #[test]
    fn test_resolve_defaults() {
        let (_dir, resolver) = resolver_with(&["foo.jpg"]);
        let html = resolver.resolve("foo");

        assert!(html.contains(r#"src="/media/foo.jpg""#));
        assert!(html.contains(r#"width="auto""#));
        assert!(html.contains(r#"height="auto""#));
        assert!(html.contains(r#"class="align-none""#));
    }

    #[test]
    fn test_resolve_not_found_names_directory() {
        let (dir, resolver) = resolver_with(&["bar.png"]);
        let html = resolver.resolve("foo");

        assert!(html.contains("image-error"));
        assert!(html.contains("\"foo\" was not found"));
        assert!(html.contains(&dir.path().display().to_string()));
    }

    #[test]
    fn test_resolve_directory_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let resolver = ImageResolver::new(missing.clone(), RoutesConfig::default());

        assert_eq!(resolver.lookup("foo"), ImageLookup::DirectoryMissing);
        let html = resolver.resolve("foo");
        assert!(html.contains("does not exist"));
        assert!(html.contains(&missing.display().to_string()));
    }

    #[test]
    fn test_resolve_unreadable_directory_reports_cause() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("images");
        std::fs::write(&not_a_dir, b"file").unwrap();
        let resolver = ImageResolver::new(not_a_dir, RoutesConfig::default());

        assert!(matches!(resolver.lookup("foo"), ImageLookup::Unreadable(_)));
        let html = resolver.resolve("foo");
        assert!(html.contains("cannot read the images directory"));
        assert!(!html.contains("does not exist"));
    }

    #[test]
    fn test_resolve_empty_name_is_silent() {
        let (_dir, resolver) = resolver_with(&["foo.png"]);
        assert_eq!(resolver.resolve(""), "");
    }

    #[test]
    fn test_lookup_requires_dot_after_name() {
        let (_dir, resolver) = resolver_with(&["foobar.png", "foo"]);
        assert_eq!(resolver.lookup("foo"), ImageLookup::NotFound);
    }

    #[test]
    fn test_lookup_ties_break_lexicographically() {
        let (_dir, resolver) = resolver_with(&["foo.webp", "foo.gif", "foo.png"]);
        assert_eq!(resolver.lookup("foo"), ImageLookup::Found("foo.gif".to_string()));
    }

    #[test]
    fn test_lookup_ignores_directories() {
        let (dir, resolver) = resolver_with(&[]);
        std::fs::create_dir(dir.path().join("foo.d")).unwrap();
        assert_eq!(resolver.lookup("foo"), ImageLookup::NotFound);
    }

    #[test]
    fn test_custom_media_route() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("foo.png"), b"img").unwrap();
        let routes = RoutesConfig {
            article: "noticia".to_string(),
            media: "imagenes".to_string(),
        };
        let resolver = ImageResolver::new(dir.path().to_path_buf(), routes);
        assert!(resolver.resolve("foo").contains(r#"src="/imagenes/foo.png""#));
    }
}
