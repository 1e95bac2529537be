use crate::contact::{CleanedContact, UNKNOWN_NAME};

const NAME_KNOWN: i32 = 30;
const NAME_UNKNOWN: i32 = -20;
const PHONE_PRESENT: i32 = 50;
const PHONE_ABSENT: i32 = -30;
const EMAIL_PRESENT: i32 = 40;
const CITY_PRESENT: i32 = 10;

/// Additive confidence score over field presence, clamped to 0..=100.
/// Ignores whatever `score` the record already carries.
pub fn score(contact: &CleanedContact) -> u8 {
    let mut total = 0;

    total += if has_real_name(&contact.name) {
        NAME_KNOWN
    } else {
        NAME_UNKNOWN
    };
    total += if contact.phone.is_some() {
        PHONE_PRESENT
    } else {
        PHONE_ABSENT
    };
    if contact.email.is_some() {
        total += EMAIL_PRESENT;
    }
    if contact.city.is_some() {
        total += CITY_PRESENT;
    }

    total.clamp(0, 100) as u8
}

fn has_real_name(name: &str) -> bool {
    !name.is_empty() && name != UNKNOWN_NAME && name.chars().count() > 2
}
