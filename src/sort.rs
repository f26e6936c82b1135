use serde_json::Value;

use crate::domain::{Row, SortPolicy};

/// Text a cell is compared by: the value as text, uppercased.
/// Null and missing values compare as the empty string.
pub fn sort_key(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    text.to_uppercase()
}

/// Returns the order in which `items` should be displayed when sorted by
/// `column`, as indices into `items`. The sort is stable and always starts
/// from the load order, so the result only depends on its arguments.
pub fn sorted_indices(
    items: &[Row],
    column: &str,
    ascending: bool,
    policy: SortPolicy,
) -> Vec<usize> {
    // Create a vector of (original_index, key) pairs
    let mut indexed_rows: Vec<(usize, String)> = items
        .iter()
        .enumerate()
        .map(|(idx, row)| (idx, sort_key(row.get(column))))
        .collect();

    match (ascending, policy) {
        (true, _) => indexed_rows.sort_by(|(_, a), (_, b)| a.cmp(b)),
        (false, SortPolicy::ReverseAscending) => {
            indexed_rows.sort_by(|(_, a), (_, b)| a.cmp(b));
            indexed_rows.reverse();
        }
        (false, SortPolicy::DescendingComparator) => {
            indexed_rows.sort_by(|(_, a), (_, b)| b.cmp(a))
        }
    }

    indexed_rows.into_iter().map(|(idx, _)| idx).collect()
}
