/// Turns raw release notes into HTML for the info screen.
///
/// Only escapes the text and marks line breaks; markdown is left as written.
pub fn format_changelog(body: &str) -> String {
    newlines_to_breaks(&escape_html(body))
}

/// Escapes the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Inserts `<br />` before each line break, keeping the break itself.
fn newlines_to_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                out.push_str("<br />\r\n");
            }
            '\r' | '\n' => {
                out.push_str("<br />");
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
