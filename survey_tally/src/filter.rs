use crate::builder::ResponseTable;
use crate::config::*;

use log::{debug, info, warn};

/// Removes the test or internal submissions.
///
/// A row is dropped when its contact field contains any of the keywords (case sensitive).
/// If the contact column does not exist, the table is returned as it is.
pub fn filter_test_responses(table: &ResponseTable, rules: &FilterRules) -> ResponseTable {
    let contact_idx = match table.column_index(&rules.contact_column) {
        Some(idx) => idx,
        None => {
            debug!(
                "filter_test_responses: no contact column {:?}, keeping all {} rows",
                rules.contact_column,
                table.len()
            );
            return table.clone();
        }
    };

    let keywords: Vec<&str> = rules
        .exclude_keywords
        .iter()
        .map(|s| s.as_str())
        .filter(|s| {
            if s.is_empty() {
                warn!("filter_test_responses: ignoring empty exclusion keyword");
            }
            !s.is_empty()
        })
        .collect();

    let res = table.retain_rows(|row| {
        let contact = row[contact_idx].as_filter_string();
        !keywords.iter().any(|k| contact.contains(k))
    });
    info!(
        "filter_test_responses: excluded {} of {} rows",
        table.len() - res.len(),
        table.len()
    );
    res
}
