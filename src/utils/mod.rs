use regex::Regex;
use std::sync::OnceLock;

/// Sentinel authors leave in a field that still needs real content.
pub const MISSING_VALUE_SENTINEL: &str = "CHANGE";

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Returns the trimmed value, or `None` when it is empty or whitespace-only.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn is_missing_sentinel(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(MISSING_VALUE_SENTINEL)
}

/// True when the string names a directly playable media file
/// (`.mp4`, `.webm`, `.ogg`, optionally followed by a query string).
pub fn has_media_extension(input: &str) -> bool {
    static MEDIA_FILE: OnceLock<Regex> = OnceLock::new();
    MEDIA_FILE
        .get_or_init(|| Regex::new(r"(?i)\.(mp4|webm|ogg)(\?.*)?$").expect("valid media regex"))
        .is_match(input.trim())
}

/// Appends `params` to `url`, joining with `&` when a query string is already present.
pub fn append_query(url: &str, params: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, params)
}
