//! Inline markup for text lines.
//!
//! - `*bold*`, `_italic_` (inner underscores become spaces), `` `code` ``
//! - `[[url][label]]` and `[[url]]` links
//!
//! Everything else is HTML-escaped.

use std::fmt::Write;
use std::sync::OnceLock;

use minijinja::value::Value;
use regex::Regex;

use crate::util::{escape_html, strip_scheme};

fn link_pattern() -> &'static Regex {
    static LINK: OnceLock<Regex> = OnceLock::new();
    LINK.get_or_init(|| {
        Regex::new(r"\[\[([^\]\s]+)\](?:\[([^\]]+)\])?\]").expect("link pattern is valid")
    })
}

/// Render one line of inline markup as HTML.
pub fn style(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;

    for caps in link_pattern().captures_iter(text) {
        let (Some(whole), Some(url)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&font(&text[last..whole.start()]));

        let label = match caps.get(2) {
            Some(label) => font(label.as_str()),
            None => escape_html(strip_scheme(url.as_str())),
        };
        let _ = write!(
            out,
            "<a href=\"{}\" target=\"_blank\">{}</a>",
            escape_html(url.as_str()),
            label
        );
        last = whole.end();
    }

    out.push_str(&font(&text[last..]));
    out
}

/// Template helper: `style(text)` returns markup that is not escaped again.
pub(crate) fn style_helper(text: &str) -> Value {
    Value::from_safe_string(style(text))
}

/// Apply font markers word by word, keeping the original whitespace.
fn font(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(start) = word_start.take() {
                out.push_str(&font_word(&text[start..i]));
            }
            out.push(c);
        } else if word_start.is_none() {
            word_start = Some(i);
        }
    }
    if let Some(start) = word_start {
        out.push_str(&font_word(&text[start..]));
    }
    out
}

fn font_word(word: &str) -> String {
    for (marker, tag) in [('*', "b"), ('_', "i"), ('`', "code")] {
        let Some(rest) = word.strip_prefix(marker) else {
            continue;
        };
        // Trailing punctuation may follow the closing marker: *bold*,
        let body = rest.trim_end_matches(|c: char| c.is_ascii_punctuation() && c != marker);
        let trailing = &rest[body.len()..];
        let Some(inner) = body.strip_suffix(marker) else {
            continue;
        };
        if inner.is_empty() {
            continue;
        }

        let inner = if marker == '_' {
            inner.replace('_', " ")
        } else {
            inner.to_string()
        };
        return format!(
            "<{tag}>{}</{tag}>{}",
            escape_html(&inner),
            escape_html(trailing),
            tag = tag
        );
    }
    escape_html(word)
}
