use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Trimmed, lowercased address if it has the `local@domain.tld` shape.
/// Syntactic only.
pub fn validate(raw: &str) -> Option<String> {
    let cleaned = raw.trim().to_lowercase();
    if cleaned.is_empty() {
        return None;
    }
    EMAIL_RE.is_match(&cleaned).then_some(cleaned)
}
