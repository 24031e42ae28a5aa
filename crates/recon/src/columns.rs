use crate::policy::{Columns, Policy, DIFFERENT_FIELDS};

/// Ordered report columns for `policy`: key first, then the optional
/// `different_fields` marker, then the selected fields.
///
/// Returns an empty list when the policy has no field lists yet.
pub fn plan_columns(policy: &Policy, key_field: &str) -> Vec<String> {
    let Some([first, second]) = policy.fields.as_ref() else {
        return Vec::new();
    };

    let mut result: Vec<String> = match policy.columns {
        Columns::Intersection => first.iter().filter(|f| second.contains(f)).cloned().collect(),
        Columns::Union => {
            let mut out = first.clone();
            for f in second {
                if !out.contains(f) {
                    out.push(f.clone());
                }
            }
            out
        }
        Columns::SymmetricDifference => first
            .iter()
            .filter(|f| !second.contains(f))
            .chain(second.iter().filter(|f| !first.contains(f)))
            .cloned()
            .collect(),
        Columns::FirstOnly => first.clone(),
        Columns::SecondOnly => second.clone(),
    };

    match result.iter().position(|f| f == key_field) {
        Some(0) => {}
        Some(pos) => {
            let key = result.remove(pos);
            result.insert(0, key);
        }
        None => result.insert(0, key_field.to_string()),
    }

    // Key is at 0 now, so the marker always lands right after it.
    if policy.include_different_fields_column {
        result.insert(1, DIFFERENT_FIELDS.to_string());
    }

    result
}
