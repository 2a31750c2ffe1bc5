use crate::builder::ResponseTable;
use crate::config::*;

use log::{debug, warn};
use std::collections::HashSet;

/// The answers of one respondent, in question order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RespondentAnswers {
    pub respondent_id: String,
    /// Rows carrying this identifier. Only the first one is reported.
    pub matched_rows: usize,
    pub answers: Vec<(Question, String)>,
}

/// Finds the answers of a respondent.
///
/// Missing answers are reported as `NO_RESPONSE`. When several rows share the
/// identifier, the first one is used and a warning is logged.
pub fn lookup_respondent(
    table: &ResponseTable,
    id_column: &str,
    respondent_id: &str,
    questions: &[Question],
) -> Result<RespondentAnswers, LookupError> {
    let id_idx = table
        .column_index(id_column)
        .ok_or_else(|| LookupError::MissingIdColumn(id_column.to_string()))?;

    let matching: Vec<&Vec<Cell>> = table
        .rows()
        .iter()
        .filter(|row| row[id_idx].as_answer().as_deref() == Some(respondent_id))
        .collect();
    let row = match matching.first() {
        Some(r) => *r,
        None => return Err(LookupError::NotFound(respondent_id.to_string())),
    };
    if matching.len() > 1 {
        warn!(
            "lookup_respondent: {} rows for respondent {:?}, using the first one",
            matching.len(),
            respondent_id
        );
    }

    let answers: Vec<(Question, String)> = questions
        .iter()
        .map(|q| {
            let answer = table
                .column_index(&q.source_column)
                .and_then(|idx| row[idx].as_answer())
                .unwrap_or_else(|| NO_RESPONSE.to_string());
            (q.clone(), answer)
        })
        .collect();
    debug!(
        "lookup_respondent: {:?}: {} answers",
        respondent_id,
        answers.len()
    );
    Ok(RespondentAnswers {
        respondent_id: respondent_id.to_string(),
        matched_rows: matching.len(),
        answers,
    })
}

/// The distinct respondent identifiers, in the order they first appear.
///
/// Returns `None` if the column does not exist.
pub fn respondent_ids(table: &ResponseTable, id_column: &str) -> Option<Vec<String>> {
    let cells = table.column(id_column)?;
    let mut seen: HashSet<String> = HashSet::new();
    let mut res: Vec<String> = Vec::new();
    for id in cells.iter().filter_map(|c| c.as_answer()) {
        if seen.insert(id.clone()) {
            res.push(id);
        }
    }
    Some(res)
}
