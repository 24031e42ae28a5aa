//! Raw table -> keyed [`Dataset`], and the inverse projection back to a table.

use log::{debug, warn};

use crate::error::ConversionError;
use crate::model::{Dataset, Record, Table};

/// Header names of a raw table (the default field selection).
pub fn header_fields<S: AsRef<str>>(raw: &[Vec<S>]) -> Vec<String> {
    raw.first()
        .map(|header| header.iter().map(|h| h.as_ref().to_string()).collect())
        .unwrap_or_default()
}

/// Convert a raw table (row 0 = header) into a keyed dataset.
///
/// Each record keeps only `included` fields plus the key field. When the same
/// key value occurs on several rows the later row replaces the earlier one.
pub fn build_dataset<S: AsRef<str>>(
    raw: &[Vec<S>],
    key_field: &str,
    included: &[String],
) -> Result<Dataset, ConversionError> {
    let header = raw.first().ok_or(ConversionError::EmptyInput)?;

    let mut key_idx = None;
    let mut columns: Vec<(usize, String)> = Vec::new();
    for (i, name) in header.iter().enumerate() {
        let name = name.as_ref();
        // A repeated header name keeps its first column.
        if columns.iter().any(|(_, seen)| seen == name) {
            continue;
        }
        if name == key_field {
            key_idx = Some(i);
        }
        if name == key_field || included.iter().any(|f| f == name) {
            columns.push((i, name.to_string()));
        }
    }

    let key_idx = key_idx.ok_or_else(|| ConversionError::MissingKeyField {
        field: key_field.to_string(),
    })?;

    // Key first, then the rest in header order.
    let mut fields = vec![key_field.to_string()];
    fields.extend(
        columns
            .iter()
            .filter(|(_, name)| name != key_field)
            .map(|(_, name)| name.clone()),
    );

    let expected = columns
        .iter()
        .map(|(i, _)| i + 1)
        .max()
        .unwrap_or(0)
        .max(key_idx + 1);

    let mut dataset = Dataset::new(key_field, fields);
    let mut overwritten = 0usize;

    for (offset, row) in raw[1..].iter().enumerate() {
        if row.len() < expected {
            return Err(ConversionError::ShortRow {
                row: offset + 2,
                expected,
                found: row.len(),
            });
        }

        let mut record = Record::new();
        for (i, name) in &columns {
            record.insert(name.clone(), row[*i].as_ref().to_string());
        }

        let key = row[key_idx].as_ref().to_string();
        if dataset.insert(key.clone(), record).is_some() {
            warn!("duplicate key '{key}' at row {}: later row wins", offset + 2);
            overwritten += 1;
        }
    }

    debug!(
        "built dataset keyed by '{key_field}': {} record(s) from {} row(s), {} overwritten",
        dataset.len(),
        raw.len() - 1,
        overwritten,
    );

    Ok(dataset)
}

/// Project a dataset back to a table over `fields` (first entry = key column).
/// Fields a record does not carry become `None`.
pub fn dataset_to_table(dataset: &Dataset, fields: &[String]) -> Table {
    let mut table: Table = Vec::with_capacity(dataset.len() + 1);
    table.push(fields.iter().cloned().map(Some).collect());

    for (key, record) in dataset.iter() {
        let mut row = Vec::with_capacity(fields.len());
        row.push(Some(key.to_string()));
        for field in fields.iter().skip(1) {
            row.push(record.get(field).map(str::to_string));
        }
        table.push(row);
    }

    table
}

/// The first `limit` records (in key order), used to show a small sample.
pub fn preview(dataset: &Dataset, limit: usize) -> Dataset {
    Dataset::from_records(
        dataset.key_field(),
        dataset.fields().to_vec(),
        dataset
            .iter()
            .take(limit)
            .map(|(k, r)| (k.to_string(), r.clone())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> Vec<Vec<String>> {
        [
            vec!["name", "value_1", "value_2", "value_3"],
            vec!["green", "1", "2", "3"],
            vec!["blue", "1", "2", "3"],
            vec!["pink", "", "-", ""],
            vec!["black", "-", "", "5,6,7"],
        ]
        .into_iter()
        .map(|r| r.into_iter().map(String::from).collect())
        .collect()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn builds_selected_fields_only() {
        let ds = build_dataset(&raw(), "name", &names(&["name", "value_1", "value_3"])).unwrap();
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.fields(), names(&["name", "value_1", "value_3"]).as_slice());

        let green = ds.get("green").unwrap();
        assert_eq!(green.get("name"), Some("green"));
        assert_eq!(green.get("value_1"), Some("1"));
        assert_eq!(green.get("value_3"), Some("3"));
        assert_eq!(green.get("value_2"), None);
        assert_eq!(green.len(), 3);

        let pink = ds.get("pink").unwrap();
        assert_eq!(pink.get("value_1"), Some(""));
    }

    #[test]
    fn key_field_is_always_retained() {
        let ds = build_dataset(&raw(), "name", &names(&["value_2"])).unwrap();
        let blue = ds.get("blue").unwrap();
        assert_eq!(blue.get("name"), Some("blue"));
        assert_eq!(blue.get("value_2"), Some("2"));
        assert_eq!(ds.fields(), names(&["name", "value_2"]).as_slice());
    }

    #[test]
    fn duplicate_key_last_write_wins() {
        let mut rows = raw();
        rows[1][0] = "blue".into();
        rows[1][1] = "first-blue".into();
        rows[2][1] = "second-blue".into();
        let ds = build_dataset(&rows, "name", &names(&["name", "value_1"])).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.get("blue").unwrap().get("value_1"), Some("second-blue"));
    }

    #[test]
    fn missing_key_field_fails() {
        let err = build_dataset(&raw(), "colour", &names(&["value_1"])).unwrap_err();
        assert_eq!(err, ConversionError::MissingKeyField { field: "colour".into() });
        assert!(err.to_string().starts_with("Convert Csv to Dict failed, error: "));
    }

    #[test]
    fn short_row_fails() {
        let mut rows = raw();
        rows[3].truncate(2);
        let err = build_dataset(&rows, "name", &names(&["value_3"])).unwrap_err();
        assert_eq!(err, ConversionError::ShortRow { row: 4, expected: 4, found: 2 });
    }

    #[test]
    fn short_row_beyond_selected_columns_is_fine() {
        let mut rows = raw();
        rows[3].truncate(2);
        let ds = build_dataset(&rows, "name", &names(&["value_1"])).unwrap();
        assert_eq!(ds.get("pink").unwrap().get("value_1"), Some(""));
    }

    #[test]
    fn empty_input_fails() {
        let rows: Vec<Vec<String>> = Vec::new();
        assert_eq!(
            build_dataset(&rows, "name", &[]).unwrap_err(),
            ConversionError::EmptyInput
        );
    }

    #[test]
    fn header_only_gives_empty_dataset() {
        let rows = vec![names(&["k", "a"])];
        let ds = build_dataset(&rows, "k", &names(&["a"])).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn table_projection_reproduces_rows() {
        let fields = names(&["name", "value_1", "value_2", "value_3"]);
        let ds = build_dataset(&raw(), "name", &fields).unwrap();
        let table = dataset_to_table(&ds, &fields);

        assert_eq!(table[0], fields.iter().cloned().map(Some).collect::<Vec<_>>());
        assert_eq!(table.len(), 5);
        for row in &raw()[1..] {
            let expected: Vec<_> = row.iter().cloned().map(Some).collect();
            assert!(table.contains(&expected), "missing row {row:?}");
        }
    }

    #[test]
    fn table_projection_marks_missing_fields() {
        let ds = build_dataset(&raw(), "name", &names(&["value_1"])).unwrap();
        let table = dataset_to_table(&ds, &names(&["name", "value_1", "value_9"]));
        let green = table.iter().find(|r| r[0].as_deref() == Some("green")).unwrap();
        assert_eq!(green, &vec![Some("green".into()), Some("1".into()), None]);
    }

    #[test]
    fn preview_limits_records() {
        let ds = build_dataset(&raw(), "name", &names(&["value_1"])).unwrap();
        let small = preview(&ds, 2);
        assert_eq!(small.len(), 2);
        assert_eq!(small.fields(), ds.fields());
        // BTreeMap order: black, blue, green, pink
        assert!(small.contains_key("black"));
        assert!(small.contains_key("blue"));
        assert_eq!(preview(&ds, 100).len(), 4);
        assert!(preview(&Dataset::default(), 10).is_empty());
    }

    #[test]
    fn repeated_header_name_keeps_first_column() {
        let rows: Vec<Vec<&str>> = vec![
            vec!["k", "a", "b", "a", "k"],
            vec!["1", "first-a", "b1", "second-a", "x"],
        ];
        let ds = build_dataset(&rows, "k", &names(&["a", "b"])).unwrap();
        assert_eq!(ds.fields(), names(&["k", "a", "b"]).as_slice());
        assert!(ds.contains_key("1"));
        assert_eq!(ds.get("1").unwrap().get("a"), Some("first-a"));
    }
}
