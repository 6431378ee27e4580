//! Shared utility functions.

use std::path::{Path, PathBuf};

/// Convert a slug to title case.
///
/// Splits on `-` and `_`, capitalizes each word.
/// "news_tuit-123" -> "News Tuit 123"
pub fn title_case(s: &str) -> String {
    s.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve a possibly-relative path against a base directory.
pub fn resolve_path(base_path: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base_path.join(path)
    } else {
        path.to_path_buf()
    }
}

/// Whether a slug can be joined onto a directory without escaping it.
pub fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.starts_with('.') && !slug.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("news_tuit-123"), "News Tuit 123");
        assert_eq!(title_case("election-results"), "Election Results");
        assert_eq!(title_case("README"), "README");
        assert_eq!(title_case("double__underscore"), "Double Underscore");
    }

    #[test]
    fn test_resolve_path() {
        assert_eq!(
            resolve_path(Path::new("/site"), Path::new("news")),
            PathBuf::from("/site/news")
        );
        assert_eq!(
            resolve_path(Path::new("/site"), Path::new("/var/news")),
            PathBuf::from("/var/news")
        );
    }

    #[test]
    fn test_is_safe_slug() {
        assert!(is_safe_slug("news_tuit_1"));
        assert!(is_safe_slug("a.b"));
        assert!(!is_safe_slug(""));
        assert!(!is_safe_slug(".hidden"));
        assert!(!is_safe_slug("../etc/passwd"));
        assert!(!is_safe_slug("nested/slug"));
        assert!(!is_safe_slug("nested\\slug"));
    }
}
