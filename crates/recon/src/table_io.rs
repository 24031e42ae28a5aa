//! Comma-delimited text <-> rows of cells.

use std::io::Write;
use std::path::Path;

use crate::error::MergeError;
use crate::model::Cell;

/// Parse delimited text into rows. Row lengths may vary; the dataset builder
/// decides whether a short row is acceptable.
pub fn read_table_from_str(text: &str) -> Result<Vec<Vec<String>>, MergeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Read a `.csv` file into rows.
pub fn read_table(path: &Path) -> Result<Vec<Vec<String>>, MergeError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(MergeError::Io(format!(
            "{}: format of read file is not known (expected .csv)",
            path.display()
        )));
    }

    let text = std::fs::read_to_string(path)
        .map_err(|e| MergeError::Io(format!("cannot read {}: {e}", path.display())))?;
    read_table_from_str(&text)
}

/// Write rows with standard quoting. `None` cells become empty fields.
pub fn write_table_to<W: Write>(writer: W, rows: &[Vec<Cell>]) -> Result<(), MergeError> {
    let mut out = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    for row in rows {
        out.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_table(path: &Path, rows: &[Vec<Cell>]) -> Result<(), MergeError> {
    let file = std::fs::File::create(path)
        .map_err(|e| MergeError::Io(format!("cannot write {}: {e}", path.display())))?;
    write_table_to(file, rows)
}
