//! Contact ingestion cleaning: phone/email canonicalization, confidence
//! scoring, and first-seen deduplication of contact batches.

pub mod clean;
pub mod config;
pub mod contact;
pub mod error;
pub mod input;
pub mod report;

use serde_json::Value;

pub use clean::{clean_batch, clean_contact, dedupe};
pub use contact::{CleanedContact, RawContact};
pub use error::{Error, Result};

/// Clean one loosely-typed record as received from a transport layer.
pub fn clean_contact_value(raw: &Value) -> CleanedContact {
    clean_contact(&RawContact::from_value(raw))
}

/// Clean a list of loosely-typed records, deduplicating unless told not to.
pub fn clean_batch_values(raw: &[Value], deduplicate: bool) -> Vec<CleanedContact> {
    let contacts: Vec<RawContact> = raw.iter().map(RawContact::from_value).collect();
    clean_batch(&contacts, deduplicate)
}
