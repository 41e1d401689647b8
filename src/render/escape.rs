use std::sync::OnceLock;

use regex::Regex;

const ACCEPTED_PREFIXES: &[&str] = &["http://", "https://", "/", "./", "../", "mailto:"];

fn bare_domain() -> &'static Regex {
    static BARE_DOMAIN: OnceLock<Regex> = OnceLock::new();
    BARE_DOMAIN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+(/\S*)?$").expect("bare domain pattern")
    })
}

/// Escapes text for HTML text and attribute context. Ampersand goes first so
/// the entities introduced afterwards are not escaped again.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Returns a usable href for `raw`, or an empty string when the value must
/// not become a link (e.g. `javascript:` URLs).
pub fn resolve_href(raw: &str) -> String {
    let value = raw.trim();
    if value == "#" {
        return value.to_string();
    }
    let lowered = value.to_ascii_lowercase();
    if ACCEPTED_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
    {
        return value.to_string();
    }
    if bare_domain().is_match(value) {
        return format!("https://{}", value);
    }
    String::new()
}
