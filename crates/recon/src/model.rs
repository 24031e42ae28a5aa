use std::collections::BTreeMap;

use serde::Serialize;

/// One output cell. `None` is a value the source record does not carry.
pub type Cell = Option<String>;

/// Rows of cells, header first.
pub type Table = Vec<Vec<Cell>>;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One keyed row: field name to text value. A field the record does not
/// carry is simply absent from the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    values: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub(crate) fn insert(&mut self, field: String, value: String) {
        self.values.insert(field, value);
    }
}

/// All records of one input, keyed by the value of `key_field`.
///
/// Every record was built from the same header with the same field subset.
/// Iteration is in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    key_field: String,
    fields: Vec<String>,
    records: BTreeMap<String, Record>,
}

impl Dataset {
    pub fn new(key_field: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            key_field: key_field.into(),
            fields,
            records: BTreeMap::new(),
        }
    }

    /// Build from already keyed records. A repeated key keeps the last record.
    pub fn from_records<I>(key_field: impl Into<String>, fields: Vec<String>, records: I) -> Self
    where
        I: IntoIterator<Item = (String, Record)>,
    {
        let mut dataset = Self::new(key_field, fields);
        for (key, record) in records {
            dataset.insert(key, record);
        }
        dataset
    }

    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    /// Field list in header order, key field first.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Record> {
        self.records.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.records.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record that was replaced, if any (last write wins).
    pub(crate) fn insert(&mut self, key: String, record: Record) -> Option<Record> {
        self.records.insert(key, record)
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Comparison report: planned columns plus one row per surviving key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Report {
    /// True when no data row survived (the header is always present).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Header row followed by the data rows.
    pub fn to_table(&self) -> Table {
        let mut table = Vec::with_capacity(self.rows.len() + 1);
        table.push(self.columns.iter().cloned().map(Some).collect());
        table.extend(self.rows.iter().cloned());
        table
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub config_name: String,
    pub engine_version: String,
    pub generated_at: String,
    pub data_rows: usize,
}

/// Serializable report with run metadata (the `--json` output).
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub meta: ReportMeta,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ReportDocument {
    pub fn new(config_name: impl Into<String>, report: Report) -> Self {
        Self {
            meta: ReportMeta {
                config_name: config_name.into(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                generated_at: chrono::Utc::now().to_rfc3339(),
                data_rows: report.rows.len(),
            },
            columns: report.columns,
            rows: report.rows,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, crate::error::MergeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
