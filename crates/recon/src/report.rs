use std::collections::BTreeSet;

use log::debug;

use crate::columns::plan_columns;
use crate::dataset::preview;
use crate::model::{Dataset, Report};
use crate::policy::{Items, Policy};
use crate::reconcile::reconcile_row;

/// Keys eligible under `items`, in key order.
pub fn select_keys<'a>(first: &'a Dataset, second: &'a Dataset, items: Items) -> Vec<&'a str> {
    match items {
        Items::Both => first.keys().filter(|k| second.contains_key(k)).collect(),
        Items::Either => first
            .keys()
            .chain(second.keys())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
        Items::FirstOnly => first.keys().filter(|k| !second.contains_key(k)).collect(),
        Items::SecondOnly => second.keys().filter(|k| !first.contains_key(k)).collect(),
    }
}

/// Compare two datasets under `policy`.
///
/// Returns `None` when a report cannot be built yet: a dataset is missing or
/// the policy carries no field lists. Otherwise the report always has its
/// planned columns, even if every row was dropped.
pub fn generate_report(
    first: Option<&Dataset>,
    second: Option<&Dataset>,
    policy: &Policy,
    key_field: &str,
) -> Option<Report> {
    let (first, second) = (first?, second?);
    let [f1, f2] = policy.fields.as_ref()?;
    if f1.is_empty() && f2.is_empty() {
        return None;
    }

    // Columns are fully resolved before any row is reconciled.
    let columns = plan_columns(policy, key_field);

    let keys = select_keys(first, second, policy.items);
    let mut rows = Vec::with_capacity(keys.len());
    let mut dropped = 0usize;

    for key in &keys {
        match reconcile_row(&columns, first.get(key), second.get(key), key, policy) {
            Some(row) => rows.push(row),
            None => dropped += 1,
        }
    }

    debug!(
        "report: {} column(s), {} key(s) selected, {} row(s), {} dropped by policy",
        columns.len(),
        keys.len(),
        rows.len(),
        dropped,
    );

    Some(Report { columns, rows })
}

/// Report over the first `limit` records of each side, for a quick look at
/// a policy before the full comparison is written out.
///
/// Each side is sampled on its own, so under `Items::Both` only keys that
/// fall inside both samples appear.
pub fn preview_report(
    first: Option<&Dataset>,
    second: Option<&Dataset>,
    policy: &Policy,
    key_field: &str,
    limit: usize,
) -> Option<Report> {
    let first = preview(first?, limit);
    let second = preview(second?, limit);
    generate_report(Some(&first), Some(&second), policy, key_field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, Record};
    use crate::policy::{Absent, Columns, Delimiter, ValuesDifferent, ValuesMatch, DIFFERENT_FIELDS};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn dataset(records: &[(&str, &[(&str, &str)])]) -> Dataset {
        Dataset::from_records(
            "key_f",
            names(&["key_f", "field_1", "field_2", "field_3"]),
            records.iter().map(|(k, pairs)| {
                let mut all = vec![("key_f", *k)];
                all.extend_from_slice(pairs);
                (k.to_string(), Record::from_pairs(all))
            }),
        )
    }

    fn first() -> Dataset {
        dataset(&[
            ("key_1", &[("field_1", "value_1_1"), ("field_2", "value_1_2"), ("field_3", "value_1_3")]),
            ("key_2", &[("field_1", "value_2_1"), ("field_2", "value_2_2")]),
        ])
    }

    fn second() -> Dataset {
        dataset(&[
            ("key_1", &[("field_1", "value_1_1"), ("field_2", "value_2")]),
            ("key_3", &[("field_1", "value_3_1"), ("field_3", "value_3_2")]),
        ])
    }

    fn fields() -> (Vec<String>, Vec<String>) {
        (
            names(&["key_f", "field_1", "field_2", "field_3"]),
            names(&["key_f", "field_1", "field_2"]),
        )
    }

    fn row(cells: &[Option<&str>]) -> Vec<Cell> {
        cells.iter().map(|c| c.map(str::to_string)).collect()
    }

    #[test]
    fn key_selection() {
        let (a, b) = (first(), second());
        assert_eq!(select_keys(&a, &b, Items::Both), vec!["key_1"]);
        assert_eq!(select_keys(&a, &b, Items::Either), vec!["key_1", "key_2", "key_3"]);
        assert_eq!(select_keys(&a, &b, Items::FirstOnly), vec!["key_2"]);
        assert_eq!(select_keys(&a, &b, Items::SecondOnly), vec!["key_3"]);
    }

    #[test]
    fn first_only_items_with_marker() {
        let (f1, f2) = fields();
        let policy = Policy {
            items: Items::FirstOnly,
            include_different_fields_column: true,
            values_different: ValuesDifferent::Second,
            delimiter: Delimiter::SpacedPipe,
            values_match: ValuesMatch::Match,
            absent: Absent::Join,
            columns: Columns::FirstOnly,
            fields: None,
        }
        .with_fields(f1, f2);

        let report = generate_report(Some(&first()), Some(&second()), &policy, "key_f").unwrap();
        assert_eq!(
            report.columns,
            names(&["key_f", DIFFERENT_FIELDS, "field_1", "field_2", "field_3"])
        );
        assert_eq!(
            report.rows,
            vec![row(&[Some("key_2"), Some(""), Some("value_2_1"), Some("value_2_2"), None])]
        );
    }

    #[test]
    fn either_items_symmetric_columns() {
        let mut a = first();
        a = Dataset::from_records(
            a.key_field(),
            a.fields().to_vec(),
            a.iter()
                .map(|(k, r)| (k.to_string(), r.clone()))
                .chain(std::iter::once((
                    "key_3".to_string(),
                    Record::from_pairs([("key_f", "key_3"), ("field_1", "value_3_1"), ("field_3", "value_3_2")]),
                ))),
        );
        let (f1, f2) = fields();
        let policy = Policy {
            items: Items::Either,
            delimiter: Delimiter::Pipe,
            columns: Columns::SymmetricDifference,
            ..Policy::default()
        }
        .with_fields(f1, f2);

        let report = generate_report(Some(&a), Some(&second()), &policy, "key_f").unwrap();
        assert_eq!(report.columns, names(&["key_f", "field_3"]));
        assert_eq!(report.len(), 3);
        assert!(report.rows.contains(&row(&[Some("key_3"), Some(" ")])));
        assert!(report.rows.contains(&row(&[Some("key_1"), Some("value_1_3 | None")])));
        assert!(report.rows.contains(&row(&[Some("key_2"), None])));
    }

    #[test]
    fn shared_keys_counted_minus_dropped() {
        let (f1, f2) = fields();
        let policy = Policy::default().with_fields(f1.clone(), f2.clone());
        let report = generate_report(Some(&first()), Some(&second()), &policy, "key_f").unwrap();
        assert_eq!(report.to_table().len(), 1 + 1);

        let policy = Policy { values_different: ValuesDifferent::DropRow, ..Policy::default() }
            .with_fields(f1, f2);
        let report = generate_report(Some(&first()), Some(&second()), &policy, "key_f").unwrap();
        assert!(report.is_empty());
        assert_eq!(report.to_table(), vec![row(&[Some("key_f"), Some("field_1"), Some("field_2")])]);
    }

    #[test]
    fn preview_report_samples_each_side() {
        let (f1, f2) = fields();
        let policy = Policy { items: Items::Either, ..Policy::default() }.with_fields(f1, f2);

        let full = generate_report(Some(&first()), Some(&second()), &policy, "key_f").unwrap();
        let sample = preview_report(Some(&first()), Some(&second()), &policy, "key_f", 1).unwrap();
        assert_eq!(sample.columns, full.columns);
        assert_eq!(sample.len(), 1);
        assert_eq!(sample.rows[0], full.rows[0]);

        assert!(preview_report(None, Some(&second()), &policy, "key_f", 5).is_none());
    }

    #[test]
    fn unavailable_without_datasets_or_fields() {
        let (f1, f2) = fields();
        let policy = Policy::default().with_fields(f1, f2);
        assert!(generate_report(None, Some(&second()), &policy, "key_f").is_none());
        assert!(generate_report(Some(&first()), None, &policy, "key_f").is_none());
        assert!(generate_report(Some(&first()), Some(&second()), &Policy::default(), "key_f").is_none());

        let empty = Policy::default().with_fields(Vec::new(), Vec::new());
        assert!(generate_report(Some(&first()), Some(&second()), &empty, "key_f").is_none());
    }
}
