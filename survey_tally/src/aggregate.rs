use crate::config::*;
use crate::detect::MULTI_SELECT_DELIMITER;

use log::debug;

/// Counts the answers of a single-choice question.
///
/// Answers are trimmed before counting. Missing and empty answers are dropped,
/// or counted under `Blank` when `include_blank` is set.
pub fn aggregate_single(values: &[&Cell], include_blank: bool) -> FrequencyDistribution {
    let labels = values.iter().filter_map(|c| {
        let answer = c.as_answer().map(|s| s.trim().to_string());
        match answer {
            Some(s) if !s.is_empty() => Some(s),
            _ if include_blank => Some(BLANK_LABEL.to_string()),
            _ => None,
        }
    });
    let res = FrequencyDistribution::from_labels(labels);
    debug!(
        "aggregate_single: {} values -> {} labels, total {}",
        values.len(),
        res.len(),
        res.total()
    );
    res
}

/// Counts the options of a multiple-choice question.
///
/// Every selected option counts once, so the total may exceed the number of rows.
/// A row without any option counts as one `Blank` when `include_blank` is set.
pub fn aggregate_multi(values: &[&Cell], include_blank: bool) -> FrequencyDistribution {
    let mut tokens: Vec<String> = Vec::new();
    for c in values.iter() {
        let parts = split_multi_value(c);
        if parts.is_empty() {
            if include_blank {
                tokens.push(BLANK_LABEL.to_string());
            }
        } else {
            tokens.extend(parts);
        }
    }
    let res = FrequencyDistribution::from_labels(tokens);
    debug!(
        "aggregate_multi: {} values -> {} labels, total {}",
        values.len(),
        res.len(),
        res.total()
    );
    res
}

/// Counts the answers according to the type of the question.
///
/// Free-text questions are not counted: they yield an empty distribution.
pub fn aggregate(
    question_type: QuestionType,
    values: &[&Cell],
    include_blank: bool,
) -> FrequencyDistribution {
    match question_type {
        QuestionType::SingleSelect => aggregate_single(values, include_blank),
        QuestionType::MultiSelect => aggregate_multi(values, include_blank),
        QuestionType::Text => FrequencyDistribution::default(),
    }
}

/// The options selected in one answer.
///
/// `nan` (in any case) and `.` are placeholders for no answer.
pub fn split_multi_value(cell: &Cell) -> Vec<String> {
    let s = match cell.as_answer() {
        Some(x) => x,
        None => return Vec::new(),
    };
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") || s == "." {
        return Vec::new();
    }
    s.split(MULTI_SELECT_DELIMITER)
        .map(|x| x.trim())
        .filter(|x| !x.is_empty())
        .map(|x| x.to_string())
        .collect()
}

/// The free-text answers, trimmed, in row order.
///
/// Missing, empty and `.` answers are left out.
pub fn list_text_answers(values: &[&Cell]) -> Vec<String> {
    values
        .iter()
        .filter_map(|c| c.as_answer())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != ".")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(v: &[Option<&str>]) -> Vec<Cell> {
        v.iter().map(|s| Cell::from(*s)).collect()
    }

    fn refs(v: &[Cell]) -> Vec<&Cell> {
        v.iter().collect()
    }

    fn entries(d: &FrequencyDistribution) -> Vec<(&str, u64)> {
        d.entries().iter().map(|(l, c)| (l.as_str(), *c)).collect()
    }

    #[test]
    fn single_counts_by_decreasing_frequency() {
        let v = cells(&[
            Some("보통"),
            Some(" 좋음 "),
            Some("좋음"),
            None,
            Some("  "),
            Some("나쁨"),
        ]);
        let d = aggregate_single(&refs(&v), false);
        assert_eq!(entries(&d), vec![("좋음", 2), ("보통", 1), ("나쁨", 1)]);
        assert_eq!(d.get(BLANK_LABEL), None);
        assert_eq!(d.total(), 4);
    }

    #[test]
    fn single_blanks_are_merged() {
        let v = cells(&[None, Some("a"), Some(""), Some(" "), Some("a")]);
        let d = aggregate_single(&refs(&v), true);
        assert_eq!(entries(&d), vec![("Blank", 3), ("a", 2)]);
        assert_eq!(d.total(), v.len() as u64);
    }

    #[test]
    fn single_numbers_are_stringified() {
        let v = vec![Cell::Number(5.0), Cell::Number(4.5), Cell::Number(5.0)];
        let d = aggregate_single(&refs(&v), false);
        assert_eq!(entries(&d), vec![("5", 2), ("4.5", 1)]);
    }

    #[test]
    fn multi_counts_every_option() {
        let v = cells(&[Some("아침|저녁"), Some("저녁"), None]);
        let d = aggregate_multi(&refs(&v), false);
        assert_eq!(entries(&d), vec![("저녁", 2), ("아침", 1)]);
    }

    #[test]
    fn multi_total_is_token_count() {
        let v = cells(&[Some("a | b |c"), Some("a||"), Some("."), Some("NaN"), None]);
        let d = aggregate_multi(&refs(&v), false);
        assert_eq!(entries(&d), vec![("a", 2), ("b", 1), ("c", 1)]);
        assert_eq!(d.total(), 4);
    }

    #[test]
    fn multi_blank_once_per_empty_row() {
        let v = cells(&[Some("a|b"), None, Some("nan"), Some(" | ")]);
        let d = aggregate_multi(&refs(&v), true);
        assert_eq!(entries(&d), vec![("Blank", 3), ("a", 1), ("b", 1)]);
    }

    #[test]
    fn empty_input_is_empty_distribution() {
        assert!(aggregate_single(&[], true).is_empty());
        assert!(aggregate_multi(&[], false).is_empty());
        let v = cells(&[None, Some("")]);
        assert!(aggregate_single(&refs(&v), false).is_empty());
        assert!(aggregate_multi(&refs(&v), false).is_empty());
    }

    #[test]
    fn text_questions_are_not_counted() {
        let v = cells(&[Some("a")]);
        assert!(aggregate(QuestionType::Text, &refs(&v), true).is_empty());
        assert_eq!(aggregate(QuestionType::SingleSelect, &refs(&v), true).total(), 1);
    }

    #[test]
    fn text_listing_skips_placeholders() {
        let v = cells(&[Some(" 좋아요 "), None, Some("."), Some(""), Some("별로")]);
        assert_eq!(list_text_answers(&refs(&v)), vec!["좋아요", "별로"]);
    }

    #[test]
    fn split_keeps_inner_spaces() {
        assert_eq!(
            split_multi_value(&Cell::from("주말 오전 | 평일 저녁")),
            vec!["주말 오전", "평일 저녁"]
        );
        assert!(split_multi_value(&Cell::Missing).is_empty());
    }
}
