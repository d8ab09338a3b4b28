//! HTML text helpers shared by the renderers.

use tracing::debug;

/// Escape HTML special characters in text and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Escape long text and keep its line breaks.
pub fn multiline(text: &str) -> String {
    html_escape(&text.replace("\r\n", "\n")).replace('\n', "<br>\n")
}

/// Clean inline rich text down to a safe tag set.
pub fn sanitize_rich_text(html: &str) -> String {
    ammonia::clean(html)
}

/// Link and image URLs must be `http(s)://` or root-relative.
///
/// Browsers drop tabs and newlines inside URLs and read `\` as `/`, so any
/// whitespace, control character, or backslash disqualifies the URL.
pub fn is_safe_url(url: &str) -> bool {
    let trimmed = url.trim();
    if trimmed
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || c == '\\')
    {
        return false;
    }
    let lower = trimmed.to_ascii_lowercase();
    lower.starts_with("https://")
        || lower.starts_with("http://")
        || (trimmed.starts_with('/') && !trimmed.starts_with("//"))
}

/// The trimmed URL when present and safe; anything else counts as absent.
pub fn safe_url(url: Option<&str>) -> Option<&str> {
    let url = url.map(str::trim).filter(|u| !u.is_empty())?;
    if is_safe_url(url) {
        Some(url)
    } else {
        debug!(url = %url, "dropping unsafe URL");
        None
    }
}

/// Non-blank text, escaped.
pub fn text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(html_escape)
}
