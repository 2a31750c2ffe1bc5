use crate::builder::ResponseTable;
use crate::config::*;

use log::{debug, info};
use std::collections::HashSet;

/// Lists the questions of the table: every column that is not metadata, in column order.
pub fn extract_questions(table: &ResponseTable, meta_columns: &[String]) -> Vec<Question> {
    let meta: HashSet<&str> = meta_columns.iter().map(|s| s.as_str()).collect();
    let res: Vec<Question> = table
        .columns()
        .iter()
        .filter(|c| !meta.contains(c.as_str()))
        .enumerate()
        .map(|(idx, col)| {
            let id = (idx + 1) as u32;
            Question {
                id,
                source_column: col.clone(),
                display_title: format!("Q{}. {}", id, strip_question_label(col)),
            }
        })
        .collect();
    info!(
        "extract_questions: {} questions out of {} columns",
        res.len(),
        table.columns().len()
    );
    for q in res.iter() {
        debug!("extract_questions: {:?}", q);
    }
    res
}

/// Removes a leading `Q<digits>.` label (and the surrounding whitespace) from a title.
pub fn strip_question_label(title: &str) -> &str {
    let s = title.trim_start();
    let rest = match s.strip_prefix('Q') {
        Some(r) => r,
        None => return title.trim(),
    };
    let digits = rest.len() - rest.trim_start_matches(char::is_numeric).len();
    if digits == 0 {
        return title.trim();
    }
    match rest[digits..].strip_prefix('.') {
        Some(r) => r.trim(),
        None => title.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TableBuilder;

    fn table(columns: &[&str]) -> ResponseTable {
        let header: Vec<String> = columns.iter().map(|s| s.to_string()).collect();
        TableBuilder::new(&header).build()
    }

    #[test]
    fn labels_follow_column_order_without_meta() {
        let t = table(&["참여자", "나이", "응답일시", "선호 시간대(최대 2개 선택)"]);
        let meta = default_meta_columns();
        let qs = extract_questions(&t, &meta);
        assert_eq!(qs.len(), 2);
        assert_eq!(qs[0].id, 1);
        assert_eq!(qs[0].source_column, "나이");
        assert_eq!(qs[0].display_title, "Q1. 나이");
        assert_eq!(qs[1].display_title, "Q2. 선호 시간대(최대 2개 선택)");
        assert_eq!(qs[1].anchor_id(), "q2");
    }

    #[test]
    fn existing_labels_are_replaced() {
        let t = table(&["Q7. 만족도", " Q12.이유 ", "Q 3. 기타"]);
        let qs = extract_questions(&t, &[]);
        let titles: Vec<&str> = qs.iter().map(|q| q.display_title.as_str()).collect();
        assert_eq!(titles, vec!["Q1. 만족도", "Q2. 이유", "Q3. Q 3. 기타"]);
        assert_eq!(qs[1].source_column, " Q12.이유 ");
    }

    #[test]
    fn relabeling_is_idempotent() {
        let t = table(&["Q9. a", "b", "Q1. c"]);
        let first = extract_questions(&t, &[]);
        let relabeled: Vec<&str> = first.iter().map(|q| q.display_title.as_str()).collect();
        let second = extract_questions(&table(&relabeled), &[]);
        let titles = |qs: &[Question]| -> Vec<String> {
            qs.iter().map(|q| q.display_title.clone()).collect()
        };
        assert_eq!(titles(&first), titles(&second));
    }

    #[test]
    fn only_meta_columns() {
        let t = table(&["참여자", "Timestamp"]);
        assert!(extract_questions(&t, &default_meta_columns()).is_empty());
    }

    #[test]
    fn strip_without_label() {
        assert_eq!(strip_question_label("  Quality "), "Quality");
        assert_eq!(strip_question_label("Q.5"), "Q.5");
        assert_eq!(strip_question_label("Q10"), "Q10");
    }

    #[test]
    fn strip_full_width_digits() {
        assert_eq!(strip_question_label("Q１. 만족도"), "만족도");
        assert_eq!(strip_question_label(" Q１２.만족도"), "만족도");
    }
}
