//! Article body rendering: paragraphs, then image placeholders.

use super::images::ImageResolver;
use super::paragraphs::format_paragraphs;

/// Render raw article text to HTML content.
pub fn render_article(raw: &str, images: &ImageResolver) -> String {
    let html = format_paragraphs(raw);
    expand_placeholders(&html, |payload| images.resolve(payload))
}

/// Replace every `*payload*` token with the result of `expand`.
///
/// Tokens are matched non-greedily and never span a line break. An opening
/// `*` without a closing one on the same line is kept as is. `\*` produces
/// a literal asterisk that neither opens nor closes a token.
pub fn expand_placeholders<F>(html: &str, mut expand: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find(['*', '\\']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("\\*") {
            out.push('*');
            rest = after;
            continue;
        }
        if let Some(after) = tail.strip_prefix('\\') {
            out.push('\\');
            rest = after;
            continue;
        }

        let body = &tail[1..];
        match closing_asterisk(body) {
            Some(end) => {
                out.push_str(&expand(&body[..end]));
                rest = &body[end + 1..];
            }
            None => {
                out.push('*');
                rest = body;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Index of the first unescaped `*` before the end of the line.
fn closing_asterisk(body: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        match c {
            '\n' => return None,
            '*' if !escaped => return Some(i),
            _ => {}
        }
        escaped = c == '\\' && !escaped;
    }
    None
}
