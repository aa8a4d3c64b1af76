//! Small text builders shared by the renderers.

use std::fmt::{self, Write};

/// Maximum number of characters of a location shown under a result.
pub const MAX_LOCATION_CHARS: usize = 45;

/// The first `words` space-separated words of a body text.
///
/// A text with fewer words is used whole. Unless the excerpt ends with a full
/// stop, `" ..."` is appended. Empty texts produce an empty excerpt.
pub fn excerpt(text: &str, words: usize) -> String {
    let tokens: Vec<&str> = text.split(' ').collect();
    let mut excerpt = if tokens.len() < words {
        text.trim().to_string()
    } else {
        tokens[..words].join(" ").trim().to_string()
    };

    if !excerpt.is_empty() && !excerpt.ends_with('.') {
        excerpt.push_str(" ...");
    }
    excerpt
}

/// Cut a location to [`MAX_LOCATION_CHARS`] characters.
pub fn truncate_location(location: &str) -> String {
    match location.char_indices().nth(MAX_LOCATION_CHARS) {
        Some((cut, _)) => format!("{} ...", &location[..cut]),
        None => location.to_string(),
    }
}

/// Format a count with thousands separators, e.g. `1,234`.
pub fn group_digits(count: usize) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// "1 result" or "N results".
pub fn result_count(count: usize) -> String {
    if count == 1 {
        "1 result".to_string()
    } else {
        format!("{} results", group_digits(count))
    }
}

/// Write `text` with HTML special characters escaped.
pub fn write_escaped(out: &mut impl Write, text: &str) -> fmt::Result {
    for c in text.chars() {
        match c {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' => out.write_str("&quot;")?,
            '\'' => out.write_str("&#39;")?,
            _ => out.write_char(c)?,
        }
    }
    Ok(())
}
