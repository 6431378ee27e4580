//! Plain text to HTML paragraphs.

/// Wrap blank-line separated text in `<p>` elements.
///
/// Leading and trailing whitespace is trimmed and every run of blank lines
/// becomes a single `</p><p>` boundary. Lines within a paragraph keep their
/// newlines. The text is trusted: nothing is escaped.
///
/// ```ignore
/// format_paragraphs("One\n\n\nTwo") => "<p>One</p><p>Two</p>"
/// ```
pub fn format_paragraphs(text: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Option<String> = None;

    for line in text.trim().split('\n') {
        if line.trim().is_empty() {
            if let Some(paragraph) = current.take() {
                paragraphs.push(paragraph);
            }
            continue;
        }

        match current.as_mut() {
            Some(paragraph) => {
                paragraph.push('\n');
                paragraph.push_str(line);
            }
            None => current = Some(line.to_string()),
        }
    }
    paragraphs.extend(current);

    format!("<p>{}</p>", paragraphs.join("</p><p>"))
}
