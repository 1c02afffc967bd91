//! Small text helpers shared by the parser and the renderer.

/// Escape HTML special characters.
pub(crate) fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Drop a leading `scheme://` or `mailto:` so a URL reads as a label.
pub(crate) fn strip_scheme(url: &str) -> &str {
    if let Some(rest) = url.strip_prefix("mailto:") {
        return rest;
    }
    match url.find("://") {
        Some(i) => &url[i + 3..],
        None => url,
    }
}
