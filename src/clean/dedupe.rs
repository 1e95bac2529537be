use std::collections::HashSet;

use crate::contact::CleanedContact;

/// First-seen deduplication on canonical phone and email. A record is
/// dropped when either identifier was already emitted; absent fields never
/// match.
pub fn dedupe(contacts: Vec<CleanedContact>) -> Vec<CleanedContact> {
    let mut seen_phones: HashSet<String> = HashSet::new();
    let mut seen_emails: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(contacts.len());

    for contact in contacts {
        let phone_seen = contact.phone.as_ref().is_some_and(|p| seen_phones.contains(p));
        let email_seen = contact.email.as_ref().is_some_and(|e| seen_emails.contains(e));
        if phone_seen || email_seen {
            continue;
        }
        if let Some(p) = &contact.phone {
            seen_phones.insert(p.clone());
        }
        if let Some(e) = &contact.email {
            seen_emails.insert(e.clone());
        }
        unique.push(contact);
    }

    unique
}

/// Keep only records with at least one usable contact point.
pub fn retain_contactable(mut contacts: Vec<CleanedContact>) -> Vec<CleanedContact> {
    contacts.retain(|c| c.phone.is_some() || c.email.is_some());
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(name: &str, phone: Option<&str>, email: Option<&str>) -> CleanedContact {
        CleanedContact {
            name: name.into(),
            phone: phone.map(Into::into),
            email: email.map(Into::into),
            raw_phone: None,
            raw_email: None,
            language: "English".into(),
            city: None,
            score: 0,
        }
    }

    fn names(list: &[CleanedContact]) -> Vec<&str> {
        list.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn same_phone_keeps_first() {
        let out = dedupe(vec![
            c("a", Some("+971501234567"), None),
            c("b", Some("+971501234567"), Some("b@x.com")),
        ]);
        assert_eq!(names(&out), ["a"]);
    }

    #[test]
    fn email_match_alone_is_enough() {
        let out = dedupe(vec![
            c("a", Some("+971501234567"), Some("a@x.com")),
            c("b", Some("+971509999999"), Some("a@x.com")),
        ]);
        assert_eq!(names(&out), ["a"]);
    }

    #[test]
    fn dropped_records_do_not_register_identifiers() {
        // "b" is dropped on phone, so its email must not knock out "c".
        let out = dedupe(vec![
            c("a", Some("+971501234567"), None),
            c("b", Some("+971501234567"), Some("b@x.com")),
            c("c", None, Some("b@x.com")),
        ]);
        assert_eq!(names(&out), ["a", "c"]);
    }

    #[test]
    fn absent_identifiers_never_collide() {
        let out = dedupe(vec![c("a", None, None), c("b", None, None), c("c", None, None)]);
        assert_eq!(names(&out), ["a", "b", "c"]);
    }

    #[test]
    fn order_preserved_and_unique() {
        let out = dedupe(vec![
            c("a", Some("+1111111112"), Some("a@x.com")),
            c("b", Some("+2222222221"), None),
            c("c", None, Some("a@x.com")),
            c("d", Some("+2222222221"), Some("d@x.com")),
            c("e", Some("+3333333331"), Some("e@x.com")),
        ]);
        assert_eq!(names(&out), ["a", "b", "e"]);

        let mut phones = HashSet::new();
        let mut emails = HashSet::new();
        for rec in &out {
            if let Some(p) = &rec.phone {
                assert!(phones.insert(p.clone()));
            }
            if let Some(e) = &rec.email {
                assert!(emails.insert(e.clone()));
            }
        }
    }

    #[test]
    fn empty_input() {
        assert!(dedupe(Vec::new()).is_empty());
    }

    #[test]
    fn contactable_filter() {
        let out = retain_contactable(vec![
            c("a", None, None),
            c("b", Some("+971501234567"), None),
            c("c", None, Some("c@x.com")),
        ]);
        assert_eq!(names(&out), ["b", "c"]);
    }
}
