use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::contact::RawContact;
use crate::error::{Error, Result};

/// A decoded input row before it is mapped onto contact fields.
pub type Row = Map<String, Value>;

const FIELDS: [&str; 5] = ["name", "phone", "email", "language", "city"];

/// Source column for each contact field. Unmapped fields read the key of the
/// same name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: Vec<(&'static str, String)>,
}

impl ColumnMapping {
    /// Parse `field=Column` pairs, e.g. `phone=Mobile`.
    pub fn parse<S: AsRef<str>>(pairs: &[S]) -> Result<Self> {
        let mut mapping = ColumnMapping::default();
        for pair in pairs {
            let pair = pair.as_ref();
            let (field, column) = pair
                .split_once('=')
                .ok_or_else(|| Error::InvalidMapping(pair.to_string()))?;
            let field: &'static str = *FIELDS
                .iter()
                .find(|f| f.eq_ignore_ascii_case(field.trim()))
                .ok_or_else(|| Error::InvalidMapping(pair.to_string()))?;
            let column = column.trim();
            if column.is_empty() {
                return Err(Error::InvalidMapping(pair.to_string()));
            }
            mapping.columns.retain(|(f, _)| *f != field);
            mapping.columns.push((field, column.to_string()));
        }
        Ok(mapping)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn column_for<'a>(&'a self, field: &'a str) -> &'a str {
        self.columns
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, c)| c.as_str())
            .unwrap_or(field)
    }

    /// Project a source row onto the contact field names.
    pub fn apply(&self, row: &Row) -> Row {
        FIELDS
            .iter()
            .filter_map(|field| {
                row.get(self.column_for(field))
                    .map(|v| (field.to_string(), v.clone()))
            })
            .collect()
    }

    pub fn to_contacts(&self, rows: &[Value]) -> Vec<RawContact> {
        rows.iter()
            .map(|row| match row {
                Value::Object(map) if !self.is_empty() => RawContact::from_map(&self.apply(map)),
                other => RawContact::from_value(other),
            })
            .collect()
    }
}

/// Load rows from a `.json` or `.csv` file, or JSON from stdin when the path
/// is `-`.
pub fn load_rows(path: &Path) -> Result<Vec<Value>> {
    let rows = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| Error::Io {
                path: path.to_path_buf(),
                source,
            })?;
        parse_json_rows(&text)?
    } else {
        match extension(path).as_str() {
            "json" => parse_json_rows(&read_file(path)?)?,
            "csv" => parse_csv_rows(read_file(path)?.as_bytes())?,
            other => return Err(Error::UnsupportedFormat(other.to_string())),
        }
    };
    info!(path = %path.display(), rows = rows.len(), "loaded input");
    Ok(rows)
}

/// Array of rows, or a single object treated as a one-row batch.
pub fn parse_json_rows(text: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(rows) => Ok(rows),
        obj @ Value::Object(_) => Ok(vec![obj]),
        other => Err(Error::InvalidInput(format!(
            "expected a JSON array or object, got {}",
            other
        ))),
    }
}

/// Header row + string cells. Cells are kept as-is; empty cells clean to
/// absent fields downstream.
pub fn parse_csv_rows<R: Read>(reader: R) -> Result<Vec<Value>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), Value::String(v.to_string())))
            .collect();
        rows.push(Value::Object(row));
    }
    Ok(rows)
}

#[derive(Debug, Serialize)]
pub struct Preview {
    pub columns: Vec<String>,
    pub preview: Vec<Value>,
    pub total_rows: usize,
}

/// Columns of the first row, the first `limit` rows, and the row count.
pub fn preview(rows: &[Value], limit: usize) -> Preview {
    let columns = match rows.first() {
        Some(Value::Object(map)) => map.keys().cloned().collect(),
        _ => Vec::new(),
    };
    Preview {
        columns,
        preview: rows.iter().take(limit).cloned().collect(),
        total_rows: rows.len(),
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: PathBuf::from(path),
        source,
    })
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}
