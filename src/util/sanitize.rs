//! Cleaning of user-supplied text before it is spliced into email HTML.
//!
//! Everything returned from this module is safe to interpolate into a
//! static HTML template without further escaping.

/// Replace the five HTML-significant characters with their entities.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Trim and escape a single-line field; absent input becomes an empty string.
pub fn sanitize_for_email(input: Option<&str>) -> String {
    match input {
        Some(s) => escape_html(s.trim()),
        None => String::new(),
    }
}

/// Like [`sanitize_for_email`], additionally turning newlines into `<br>` so
/// multi-line message bodies keep their shape when rendered as HTML.
pub fn sanitize_message(input: Option<&str>) -> String {
    sanitize_for_email(input)
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}

const ALLOWED_URL_SCHEMES: [&str; 4] = ["http://", "https://", "mailto:", "tel:"];

/// Allow-list of href schemes; anything else (javascript:, data:, relative
/// paths) collapses to an empty string.
pub fn sanitize_url(input: &str) -> String {
    let trimmed = input.trim();
    if ALLOWED_URL_SCHEMES
        .iter()
        .any(|scheme| trimmed.starts_with(scheme))
    {
        trimmed.to_string()
    } else {
        String::new()
    }
}
