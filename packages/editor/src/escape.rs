//! Escaping of edited text before it is written back into JSX source.
//!
//! The apply-edit endpoint splices `newFullText` verbatim between JSX tags.
//! Angle brackets and braces would be read as markup or expressions by the
//! source parser, so they are replaced by their HTML entities. Every other
//! character passes through untouched.

/// Replace `<`, `>`, `{` and `}` with `&lt;`, `&gt;`, `&#123;` and `&#125;`.
pub fn escape_source_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '{' => escaped.push_str("&#123;"),
            '}' => escaped.push_str("&#125;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
