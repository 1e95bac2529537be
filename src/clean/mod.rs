pub mod dedupe;
pub mod email;
pub mod phone;
pub mod score;

use rayon::prelude::*;
use tracing::info;

use crate::contact::{trimmed, CleanedContact, RawContact, DEFAULT_LANGUAGE, UNKNOWN_NAME};

pub use dedupe::{dedupe, retain_contactable};

/// raw record → normalized fields → score. Never fails; bad input only
/// produces absent fields.
pub fn clean_contact(raw: &RawContact) -> CleanedContact {
    let raw_phone = trimmed(raw.phone.as_deref());
    let raw_email = trimmed(raw.email.as_deref());

    let mut cleaned = CleanedContact {
        name: resolve_name(raw.name.as_deref()),
        phone: raw_phone.as_deref().and_then(phone::normalize),
        email: raw_email.as_deref().and_then(email::validate),
        raw_phone,
        raw_email,
        language: trimmed(raw.language.as_deref()).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        city: trimmed(raw.city.as_deref()),
        score: 0,
    };
    cleaned.score = score::score(&cleaned);
    cleaned
}

/// Clean every record in parallel, keeping input order.
pub fn clean_all(raw: &[RawContact]) -> Vec<CleanedContact> {
    raw.par_iter().map(clean_contact).collect()
}

/// Clean a batch, then drop later duplicates if `deduplicate` is set.
pub fn clean_batch(raw: &[RawContact], deduplicate: bool) -> Vec<CleanedContact> {
    let cleaned = clean_all(raw);
    if !deduplicate {
        return cleaned;
    }
    let before = cleaned.len();
    let unique = dedupe(cleaned);
    info!(
        total = before,
        kept = unique.len(),
        duplicates = before - unique.len(),
        "batch deduplicated"
    );
    unique
}

fn resolve_name(raw: Option<&str>) -> String {
    match trimmed(raw) {
        Some(name) if name.to_lowercase() != "unknown" => name,
        _ => UNKNOWN_NAME.to_string(),
    }
}

// ── Tests ──
