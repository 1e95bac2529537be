use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::contact::CleanedContact;

/// Outcome of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub total_processed: usize,
    pub total_kept: usize,
    pub duplicates_skipped: usize,
    pub without_contact_skipped: usize,
    pub valid_phones: usize,
    pub invalid_phones: usize,
    pub valid_emails: usize,
    pub invalid_emails: usize,
    pub average_score: f64,
    pub generated_at: DateTime<Utc>,
}

impl BatchReport {
    /// `after_dedupe` is the record count once duplicates are gone but
    /// before the contact-point filter. Field counts are over `kept`.
    pub fn build(total_processed: usize, after_dedupe: usize, kept: &[CleanedContact]) -> Self {
        let valid_phones = kept.iter().filter(|c| c.phone.is_some()).count();
        let invalid_phones = kept
            .iter()
            .filter(|c| c.phone.is_none() && c.raw_phone.is_some())
            .count();
        let valid_emails = kept.iter().filter(|c| c.email.is_some()).count();
        let invalid_emails = kept
            .iter()
            .filter(|c| c.email.is_none() && c.raw_email.is_some())
            .count();
        let average_score = if kept.is_empty() {
            0.0
        } else {
            kept.iter().map(|c| f64::from(c.score)).sum::<f64>() / kept.len() as f64
        };

        BatchReport {
            total_processed,
            total_kept: kept.len(),
            duplicates_skipped: total_processed.saturating_sub(after_dedupe),
            without_contact_skipped: after_dedupe.saturating_sub(kept.len()),
            valid_phones,
            invalid_phones,
            valid_emails,
            invalid_emails,
            average_score,
            generated_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Processed {} contacts: {} kept, {} duplicates, {} without contact point.\n\
             Phones: {} valid, {} invalid | Emails: {} valid, {} invalid | Avg score: {:.1}",
            self.total_processed,
            self.total_kept,
            self.duplicates_skipped,
            self.without_contact_skipped,
            self.valid_phones,
            self.invalid_phones,
            self.valid_emails,
            self.invalid_emails,
            self.average_score,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(phone: Option<&str>, raw_phone: Option<&str>, email: Option<&str>, score: u8) -> CleanedContact {
        CleanedContact {
            name: "Someone".into(),
            phone: phone.map(Into::into),
            email: email.map(Into::into),
            raw_phone: raw_phone.map(Into::into),
            raw_email: email.map(Into::into),
            language: "English".into(),
            city: None,
            score,
        }
    }

    #[test]
    fn counts() {
        let kept = vec![
            c(Some("+971501234567"), Some("0501234567"), Some("a@b.co"), 100),
            c(None, Some("123"), Some("c@d.co"), 40),
        ];
        let r = BatchReport::build(5, 3, &kept);
        assert_eq!(r.total_kept, 2);
        assert_eq!(r.duplicates_skipped, 2);
        assert_eq!(r.without_contact_skipped, 1);
        assert_eq!(r.valid_phones, 1);
        assert_eq!(r.invalid_phones, 1);
        assert_eq!(r.valid_emails, 2);
        assert_eq!(r.invalid_emails, 0);
        assert!((r.average_score - 70.0).abs() < f64::EPSILON);
        assert!(r.summary().contains("5 contacts: 2 kept"));
    }

    #[test]
    fn empty_batch() {
        let r = BatchReport::build(0, 0, &[]);
        assert_eq!(r.average_score, 0.0);
        assert_eq!(r.total_kept, 0);
    }
}
