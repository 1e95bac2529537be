use tracing::debug;

const MAX_DIGITS: usize = 14;
const MIN_DIGITS: usize = 10;
const UAE_CODE: &str = "971";
const UAE_LEN: usize = 12;
const ZERO_RUN: &str = "0000000";

/// Canonical dialing form (`+` and 10–14 digits), or `None` when the input
/// is empty, implausible, or fails the length rules.
pub fn normalize(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    let digits = digits_only(raw);
    if digits.len() > MAX_DIGITS {
        debug!(digits = digits.len(), "phone rejected: too long");
        return None;
    }
    if digits.is_empty() {
        return None;
    }

    let digits = rewrite_uae_local(digits);

    if digits.starts_with(UAE_CODE) && digits.len() != UAE_LEN {
        debug!(%digits, "phone rejected: bad UAE length");
        return None;
    }
    if digits.len() < MIN_DIGITS {
        debug!(%digits, "phone rejected: too short");
        return None;
    }
    // Runs on the rewritten form, so a local all-5s number survives once
    // the 971 prefix is added.
    if is_implausible(&digits) {
        debug!(%digits, "phone rejected: placeholder pattern");
        return None;
    }

    Some(format!("+{}", digits))
}

/// Keep ASCII digits, folding Arabic-Indic digit forms into ASCII.
fn digits_only(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            '0'..='9' => Some(c),
            '\u{0660}'..='\u{0669}' => shift(c, 0x0660),
            '\u{06F0}'..='\u{06F9}' => shift(c, 0x06F0),
            _ => None,
        })
        .collect()
}

fn shift(c: char, zero: u32) -> Option<char> {
    char::from_digit(c as u32 - zero, 10)
}

/// 05XXXXXXXX (10) and 5XXXXXXXX (9) → 9715XXXXXXXX.
fn rewrite_uae_local(digits: String) -> String {
    if digits.starts_with("05") && digits.len() == 10 {
        format!("{}{}", UAE_CODE, &digits[1..])
    } else if digits.len() == 9 && digits.starts_with('5') {
        format!("{}{}", UAE_CODE, digits)
    } else {
        digits
    }
}

fn is_implausible(digits: &str) -> bool {
    let mut chars = digits.chars();
    let all_same = match chars.next() {
        Some(first) => digits.len() > 1 && chars.all(|c| c == first),
        None => false,
    };
    all_same || digits.contains(ZERO_RUN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uae_local_ten_digit() {
        assert_eq!(normalize("0501234567").as_deref(), Some("+971501234567"));
        assert_eq!(normalize("050 123 4567").as_deref(), Some("+971501234567"));
    }

    #[test]
    fn uae_local_nine_digit() {
        assert_eq!(normalize("501234567").as_deref(), Some("+971501234567"));
    }

    #[test]
    fn international_formatting_stripped() {
        assert_eq!(normalize("+971 (50) 123-4567").as_deref(), Some("+971501234567"));
        assert_eq!(normalize("+44 20 7946 0958").as_deref(), Some("+442079460958"));
        assert_eq!(normalize("+1 (415) 555-1212").as_deref(), Some("+14155551212"));
    }

    #[test]
    fn repeated_local_five_passes_after_rewrite() {
        assert_eq!(normalize("555555555").as_deref(), Some("+971555555555"));
    }

    #[test]
    fn repeated_digits_rejected() {
        assert_eq!(normalize("1111111111"), None);
        assert_eq!(normalize("5555555555"), None);
    }

    #[test]
    fn zero_runs_rejected() {
        assert_eq!(normalize("4420000000123"), None);
        // six zeros is fine
        assert_eq!(normalize("442000000123").as_deref(), Some("+442000000123"));
    }

    #[test]
    fn uae_prefix_requires_twelve_digits() {
        assert_eq!(normalize("97150123456"), None);
        assert_eq!(normalize("9715012345678"), None);
        assert_eq!(normalize("971501234567").as_deref(), Some("+971501234567"));
    }

    #[test]
    fn length_bounds() {
        assert_eq!(normalize("123456789"), None);
        assert_eq!(normalize("123456789012345"), None);
        assert_eq!(normalize("12345678901234").as_deref(), Some("+12345678901234"));
        assert_eq!(normalize("1234567890").as_deref(), Some("+1234567890"));
    }

    #[test]
    fn empty_and_digitless() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   "), None);
        assert_eq!(normalize("n/a"), None);
    }

    #[test]
    fn arabic_indic_digits_folded() {
        assert_eq!(normalize("٠٥٠١٢٣٤٥٦٧").as_deref(), Some("+971501234567"));
        assert_eq!(normalize("۰۵۰۱۲۳۴۵۶۷").as_deref(), Some("+971501234567"));
    }

    #[test]
    fn idempotent_on_own_output() {
        for raw in ["0501234567", "555555555", "+44 20 7946 0958", "12345678901234"] {
            let once = normalize(raw).unwrap();
            assert_eq!(normalize(&once).as_deref(), Some(once.as_str()));
        }
    }

    #[test]
    fn output_shape_holds() {
        for raw in ["0501234567", "+1 415 555 1212", "abc 9876543210 x", "97155 555 5555"] {
            if let Some(p) = normalize(raw) {
                let digits = &p[1..];
                assert!(p.starts_with('+'));
                assert!(digits.chars().all(|c| c.is_ascii_digit()));
                assert!((10..=14).contains(&digits.len()));
            }
        }
    }
}
