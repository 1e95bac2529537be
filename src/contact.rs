use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

pub const UNKNOWN_NAME: &str = "Unknown";
pub const DEFAULT_LANGUAGE: &str = "English";

/// One incoming record after boundary decoding. Every field is the input
/// value coerced to text, or `None` when the key was missing or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawContact {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub language: Option<String>,
    pub city: Option<String>,
}

/// Canonical, scored record. Absent fields serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedContact {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub raw_phone: Option<String>,
    pub raw_email: Option<String>,
    pub language: String,
    pub city: Option<String>,
    pub score: u8,
}

impl RawContact {
    /// Decode a loosely-typed JSON value. Anything that is not an object
    /// yields an empty record.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            other => {
                warn!(kind = value_kind(other), "contact row is not an object, treating as empty");
                Self::default()
            }
        }
    }

    pub fn from_map(map: &Map<String, Value>) -> Self {
        let field = |key: &str| map.get(key).and_then(coerce_text);
        RawContact {
            name: field("name"),
            phone: field("phone"),
            email: field("email"),
            language: field("language"),
            city: field("city"),
        }
    }
}

/// Scalar → text. `null` is absent; containers fall back to compact JSON.
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Trimmed text, `None` when nothing is left.
pub(crate) fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
