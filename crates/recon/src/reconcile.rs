use crate::model::{Cell, Record};
use crate::policy::{
    Absent, Policy, ValuesDifferent, ValuesMatch, ABSENT, DASH, DIFFERENT, DIFFERENT_FIELDS,
    MATCH, MISSING, NOTHING,
};

/// Build the report row for one key.
///
/// `columns[0]` is the key column. Returns `None` when the policy drops the
/// row (`Absent::DropRow` or `ValuesDifferent::DropRow`).
pub fn reconcile_row(
    columns: &[String],
    first: Option<&Record>,
    second: Option<&Record>,
    key: &str,
    policy: &Policy,
) -> Option<Vec<Cell>> {
    let delimiter = policy.delimiter.separator();
    let mut row: Vec<Cell> = Vec::with_capacity(columns.len());
    let mut differences: Option<Vec<&str>> = None;

    for (i, field) in columns.iter().enumerate() {
        if i == 0 {
            row.push(Some(key.to_string()));
            continue;
        }

        if field == DIFFERENT_FIELDS {
            row.push(text(NOTHING));
            differences = Some(Vec::new());
            continue;
        }

        let (left, right) = match (first, second) {
            (Some(only), None) | (None, Some(only)) => {
                row.push(only.get(field).map(str::to_string));
                continue;
            }
            (Some(l), Some(r)) => (l.get(field), r.get(field)),
            (None, None) => {
                row.push(None);
                continue;
            }
        };

        let cell = match (left, right) {
            (None, _) | (_, None) => match policy.absent {
                Absent::Join => Some(format!(
                    "{}{delimiter}{}",
                    left.unwrap_or(MISSING),
                    right.unwrap_or(MISSING)
                )),
                Absent::Concat => Some(format!("{}{}", left.unwrap_or(""), right.unwrap_or(""))),
                Absent::Dash => text(DASH),
                Absent::Absent => text(ABSENT),
                Absent::DropRow => return None,
                Absent::Blank => text(NOTHING),
            },
            (Some(l), Some(r)) if l == r => match policy.values_match {
                ValuesMatch::Blank => text(NOTHING),
                ValuesMatch::Value => text(l),
                ValuesMatch::Match => text(MATCH),
            },
            (Some(l), Some(r)) => {
                if let Some(diffs) = differences.as_mut() {
                    diffs.push(field);
                }
                match policy.values_different {
                    ValuesDifferent::Join => Some(format!("{l}{delimiter}{r}")),
                    ValuesDifferent::First => text(l),
                    ValuesDifferent::Second => text(r),
                    ValuesDifferent::Blank => text(NOTHING),
                    ValuesDifferent::Different => text(DIFFERENT),
                    ValuesDifferent::DropRow => return None,
                }
            }
        };
        row.push(cell);
    }

    if let Some(diffs) = differences {
        if let Some(marker) = columns.iter().position(|c| c == DIFFERENT_FIELDS) {
            row[marker] = Some(diffs.join(", "));
        }
    }

    Some(row)
}

fn text(s: &str) -> Cell {
    Some(s.to_string())
}
