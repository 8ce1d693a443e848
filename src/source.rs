//! Record sources for the dashboard.
//!
//! A source is read in full on every request; nothing is cached between
//! calls. Failures to reach or decode the source surface as `SourceError`.

use crate::errors::SourceError;
use crate::models::RawRecord;
use csv::StringRecord;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub trait SalesSource: Send + Sync {
    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;

    /// Blocking fetch of the whole record set.
    fn fetch(&self) -> Result<Vec<RawRecord>, SourceError>;
}

/// Picks a reader by file extension: `.json` is read as JSON, anything else
/// as CSV.
pub fn open_source(path: impl Into<PathBuf>) -> Arc<dyn SalesSource> {
    let path = path.into();
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        Arc::new(JsonFileSource::new(path))
    } else {
        Arc::new(CsvFileSource::new(path))
    }
}

#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SalesSource for CsvFileSource {
    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, SourceError> {
        let file = open(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| SourceError::new(format!("failed to read CSV headers: {e}")))?
            .clone();
        let columns = Columns::locate(&headers)?;

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            // records() starts after the header line; lines are 1-based.
            let line = idx + 2;
            let row = result.map_err(|e| SourceError::new(format!("line {line}: {e}")))?;
            records.push(columns.extract(&row));
        }
        Ok(records)
    }
}

struct Columns {
    kind: usize,
    date: usize,
    amount: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, SourceError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| normalize_header_name(header) == name)
                .ok_or_else(|| SourceError::new(format!("missing required column '{name}'")))
        };
        Ok(Self {
            kind: find("type")?,
            date: find("date")?,
            amount: find("amount")?,
        })
    }

    fn extract(&self, row: &StringRecord) -> RawRecord {
        let field = |idx: usize| row.get(idx).unwrap_or_default().to_string();
        RawRecord {
            kind: field(self.kind),
            date: field(self.date),
            amount: field(self.amount),
        }
    }
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Deserialize)]
struct JsonRecord {
    #[serde(rename = "type", alias = "TYPE", alias = "Type")]
    kind: String,
    #[serde(default, alias = "DATE", alias = "Date")]
    date: serde_json::Value,
    #[serde(default, alias = "AMOUNT", alias = "Amount")]
    amount: serde_json::Value,
}

impl From<JsonRecord> for RawRecord {
    fn from(record: JsonRecord) -> Self {
        RawRecord {
            kind: record.kind,
            date: field_text(record.date),
            amount: field_text(record.amount),
        }
    }
}

/// Field values stay untyped here; `summary::parse_sales` decides validity.
fn field_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl SalesSource for JsonFileSource {
    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, SourceError> {
        let file = open(&self.path)?;
        let records: Vec<JsonRecord> = serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|e| SourceError::new(format!("failed to parse '{}': {e}", self.path.display())))?;
        Ok(records.into_iter().map(RawRecord::from).collect())
    }
}

/// Fixed in-memory record set.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<RawRecord>,
}

impl MemorySource {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

impl SalesSource for MemorySource {
    fn describe(&self) -> String {
        format!("memory:{} records", self.records.len())
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, SourceError> {
        Ok(self.records.clone())
    }
}

fn open(path: &Path) -> Result<File, SourceError> {
    File::open(path).map_err(|e| SourceError::new(format!("failed to open '{}': {e}", path.display())))
}
