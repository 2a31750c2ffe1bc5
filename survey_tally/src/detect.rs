use crate::config::*;

use log::debug;

/// The character separating the options of a multiple-choice answer.
pub const MULTI_SELECT_DELIMITER: char = '|';

/// Classifies a question from its title and its answers.
///
/// The first matching rule wins:
/// 1. free text: contact question, title with an open-ended hint, or long answers on average
/// 2. multiple choice: title with the selection marker, or some answer contains `|`
/// 3. single choice
pub fn detect_question_type(title: &str, values: &[&Cell], rules: &DetectionRules) -> QuestionType {
    let res = if is_text_question(title, values, rules) {
        QuestionType::Text
    } else if is_multi_select(title, values, rules) {
        QuestionType::MultiSelect
    } else {
        QuestionType::SingleSelect
    };
    debug!("detect_question_type: {:?} -> {:?}", title, res);
    res
}

pub fn is_text_question(title: &str, values: &[&Cell], rules: &DetectionRules) -> bool {
    if !rules.contact_marker.is_empty() && title.contains(rules.contact_marker.as_str()) {
        return true;
    }

    if rules
        .text_hints
        .iter()
        .any(|hint| !hint.is_empty() && title.contains(hint.as_str()))
    {
        return true;
    }

    match mean_answer_length(values) {
        Some(mean) => mean > rules.long_text_threshold,
        // Nothing to measure: not decided by length.
        None => false,
    }
}

pub fn is_multi_select(title: &str, values: &[&Cell], rules: &DetectionRules) -> bool {
    if !rules.multi_select_marker.is_empty() && title.contains(rules.multi_select_marker.as_str())
    {
        return true;
    }
    values
        .iter()
        .filter_map(|c| c.as_answer())
        .any(|s| s.contains(MULTI_SELECT_DELIMITER))
}

/// Mean number of characters of the trimmed answers, ignoring the missing ones.
fn mean_answer_length(values: &[&Cell]) -> Option<f64> {
    let lengths: Vec<usize> = values
        .iter()
        .filter_map(|c| c.as_answer())
        .map(|s| s.trim().chars().count())
        .collect();
    if lengths.is_empty() {
        return None;
    }
    Some(lengths.iter().sum::<usize>() as f64 / lengths.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(v: &[Option<&str>]) -> Vec<Cell> {
        v.iter().map(|s| Cell::from(*s)).collect()
    }

    fn detect(title: &str, v: &[Cell]) -> QuestionType {
        let refs: Vec<&Cell> = v.iter().collect();
        detect_question_type(title, &refs, &DetectionRules::default())
    }

    #[test]
    fn contact_question_is_text() {
        let v = cells(&[Some("a|b"), Some("x")]);
        assert_eq!(detect("연락처(이메일/전화번호)", &v), QuestionType::Text);
        assert_eq!(detect("연락처(이메일/전화번호)", &[]), QuestionType::Text);
    }

    #[test]
    fn hint_in_title_is_text() {
        assert_eq!(
            detect("불편했던 사례를 적어주세요", &cells(&[Some("없음")])),
            QuestionType::Text
        );
        assert_eq!(
            detect("어떻게 알게 되셨나요?", &cells(&[Some("지인")])),
            QuestionType::Text
        );
    }

    #[test]
    fn long_answers_are_text() {
        let long = "가".repeat(81);
        let v = cells(&[Some(long.as_str()), None]);
        assert_eq!(detect("의견", &v), QuestionType::Text);
        let exact = "가".repeat(80);
        let v = cells(&[Some(exact.as_str())]);
        assert_eq!(detect("의견", &v), QuestionType::SingleSelect);
    }

    #[test]
    fn length_is_measured_after_trim() {
        let padded = format!("  {}  ", "a".repeat(80));
        assert_eq!(
            detect("의견", &cells(&[Some(padded.as_str())])),
            QuestionType::SingleSelect
        );
    }

    #[test]
    fn empty_column_is_not_text() {
        assert_eq!(detect("나이", &cells(&[None, None])), QuestionType::SingleSelect);
        assert_eq!(detect("나이", &[]), QuestionType::SingleSelect);
    }

    #[test]
    fn marker_in_title_is_multi() {
        let v = cells(&[Some("아침|저녁"), Some("저녁"), None]);
        assert_eq!(detect("선호 시간대(최대 2개 선택)", &v), QuestionType::MultiSelect);
        assert_eq!(
            detect("선호 시간대(최대 2개 선택)", &cells(&[Some("아침")])),
            QuestionType::MultiSelect
        );
    }

    #[test]
    fn delimiter_in_answers_is_multi() {
        let v = cells(&[Some("아침"), Some("점심 | 저녁")]);
        assert_eq!(detect("선호 시간대", &v), QuestionType::MultiSelect);
    }

    #[test]
    fn numbers_are_single_select() {
        let v = vec![Cell::Number(1.0), Cell::Number(5.0), Cell::Missing];
        assert_eq!(detect("만족도", &v), QuestionType::SingleSelect);
    }

    #[test]
    fn rules_are_configurable() {
        let rules = DetectionRules {
            contact_marker: "email".to_string(),
            text_hints: vec!["describe".to_string()],
            multi_select_marker: "select all".to_string(),
            long_text_threshold: 3.0,
        };
        let short = cells(&[Some("ab")]);
        let refs: Vec<&Cell> = short.iter().collect();
        assert_eq!(
            detect_question_type("Your email", &refs, &rules),
            QuestionType::Text
        );
        assert_eq!(
            detect_question_type("Please describe", &refs, &rules),
            QuestionType::Text
        );
        assert_eq!(
            detect_question_type("Fruits (select all)", &refs, &rules),
            QuestionType::MultiSelect
        );
        let long = cells(&[Some("abcd")]);
        let refs: Vec<&Cell> = long.iter().collect();
        assert_eq!(
            detect_question_type("Fruit", &refs, &rules),
            QuestionType::Text
        );
    }
}
