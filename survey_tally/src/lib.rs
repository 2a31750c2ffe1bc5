mod config;
use log::{debug, info};

pub mod aggregate;
pub mod builder;
pub mod detect;
pub mod display;
pub mod filter;
pub mod lookup;
pub mod manual;
pub mod questions;

pub use crate::aggregate::{aggregate, aggregate_multi, aggregate_single, list_text_answers};
pub use crate::builder::{ResponseTable, TableBuilder};
pub use crate::config::*;
pub use crate::detect::detect_question_type;
pub use crate::display::reduce;
pub use crate::filter::filter_test_responses;
pub use crate::lookup::{lookup_respondent, respondent_ids, RespondentAnswers};
pub use crate::questions::extract_questions;

/// What is shown for one question.
#[derive(PartialEq, Debug, Clone)]
pub enum QuestionContent {
    /// Choice questions. `full` holds the exact counts for the statistics table,
    /// `display` the reduced version for the chart. Both are empty when nobody answered.
    Distribution {
        full: FrequencyDistribution,
        display: FrequencyDistribution,
    },
    /// Free-text answers.
    Listing(Vec<String>),
}

#[derive(PartialEq, Debug, Clone)]
pub struct QuestionReport {
    pub question: Question,
    pub question_type: QuestionType,
    pub chart: ChartKind,
    pub content: QuestionContent,
}

impl QuestionReport {
    /// True when there is nothing to display for this question.
    pub fn is_empty(&self) -> bool {
        match &self.content {
            QuestionContent::Distribution { full, .. } => full.is_empty(),
            QuestionContent::Listing(l) => l.is_empty(),
        }
    }
}

/// Classifies and tabulates one question.
pub fn analyze_question(
    table: &ResponseTable,
    question: &Question,
    options: &DisplayOptions,
    rules: &DetectionRules,
) -> QuestionReport {
    let values: Vec<&Cell> = table.column(&question.source_column).unwrap_or_default();
    let question_type = detect_question_type(&question.source_column, &values, rules);
    let chart = ChartKind::for_question_type(question_type);
    let content = match question_type {
        QuestionType::Text => QuestionContent::Listing(list_text_answers(&values)),
        QuestionType::SingleSelect | QuestionType::MultiSelect => {
            let full = aggregate(question_type, &values, options.include_blank);
            let display = reduce(&full, options.top_n);
            QuestionContent::Distribution { full, display }
        }
    };
    debug!(
        "analyze_question: {} {:?} -> {:?}",
        question.display_title, question_type, content
    );
    QuestionReport {
        question: question.clone(),
        question_type,
        chart,
        content,
    }
}

/// Runs the analysis of every question over the same table.
///
/// Arguments:
/// * `table` the responses, usually after `filter_test_responses`
/// * `questions` the output of `extract_questions`
/// * `options` blank handling and display reduction
/// * `rules` the heuristics of the type detection
pub fn analyze(
    table: &ResponseTable,
    questions: &[Question],
    options: &DisplayOptions,
    rules: &DetectionRules,
) -> Vec<QuestionReport> {
    info!(
        "Analyzing {} questions over {} responses, options: {:?}",
        questions.len(),
        table.len(),
        options
    );
    let res: Vec<QuestionReport> = questions
        .iter()
        .map(|q| analyze_question(table, q, options, rules))
        .collect();
    for r in res.iter() {
        match &r.content {
            QuestionContent::Distribution { full, .. } => info!(
                "{} [{}] {} labels, {} answers",
                r.question.display_title,
                r.question_type.as_str(),
                full.len(),
                full.total()
            ),
            QuestionContent::Listing(l) => info!(
                "{} [{}] {} answers",
                r.question.display_title,
                r.question_type.as_str(),
                l.len()
            ),
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn header(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn survey() -> ResponseTable {
        let mut b = TableBuilder::new(&header(&[
            "참여자",
            "Q1. 선호 시간대(최대 2개 선택)",
            "만족도",
            "연락처(이메일/전화번호)",
            "개선이 필요한 점을 적어주세요",
            "빈 문항",
        ]));
        let rows: Vec<Vec<Option<&str>>> = vec![
            vec![Some("kim"), Some("아침|저녁"), Some("좋음"), Some("kim@mail.com"), Some("없음"), None],
            vec![Some("lee"), Some("저녁"), Some("보통"), Some("lee@mail.com"), None, None],
            vec![Some("tester"), Some("아침"), Some("좋음"), Some("test@corp.com"), Some("."), None],
            vec![Some("park"), None, Some("좋음"), None, Some("주차장"), None],
        ];
        for r in rows {
            b.add_row(r.into_iter().map(Cell::from).collect()).unwrap();
        }
        b.build()
    }

    #[test]
    fn full_pipeline() {
        init();
        let table = filter_test_responses(&survey(), &FilterRules::default());
        assert_eq!(table.len(), 3);
        let questions = extract_questions(&table, &default_meta_columns());
        assert_eq!(questions.len(), 5);
        let reports = analyze(
            &table,
            &questions,
            &DisplayOptions::default(),
            &DetectionRules::default(),
        );

        let times = &reports[0];
        assert_eq!(times.question.display_title, "Q1. 선호 시간대(최대 2개 선택)");
        assert_eq!(times.question_type, QuestionType::MultiSelect);
        assert_eq!(times.chart, ChartKind::Pie);
        match &times.content {
            QuestionContent::Distribution { full, display } => {
                assert_eq!(
                    full.entries(),
                    &[("저녁".to_string(), 2), ("아침".to_string(), 1)]
                );
                assert_eq!(full, display);
            }
            c => panic!("unexpected content {:?}", c),
        }

        assert_eq!(reports[1].question_type, QuestionType::SingleSelect);
        assert_eq!(reports[2].question_type, QuestionType::Text);
        assert_eq!(reports[2].chart, ChartKind::TextList);
        assert_eq!(
            reports[3].content,
            QuestionContent::Listing(vec!["없음".to_string(), "주차장".to_string()])
        );

        assert_eq!(reports[4].question_type, QuestionType::SingleSelect);
        assert!(reports[4].is_empty());
    }

    #[test]
    fn blank_answers_on_request() {
        init();
        let table = survey();
        let questions = extract_questions(&table, &default_meta_columns());
        let options = DisplayOptions::new(true, 3).unwrap();
        let report = analyze_question(&table, &questions[4], &options, &DetectionRules::default());
        match report.content {
            QuestionContent::Distribution { full, .. } => {
                assert_eq!(full.entries(), &[(BLANK_LABEL.to_string(), 4)]);
            }
            c => panic!("unexpected content {:?}", c),
        }
    }

    #[test]
    fn display_is_reduced_but_stats_are_not() {
        let mut b = TableBuilder::new(&header(&["과일"]));
        for (label, n) in [("A", 5), ("B", 4), ("C", 3), ("D", 2), ("E", 1)] {
            for _ in 0..n {
                b.add_row(vec![Cell::from(label)]).unwrap();
            }
        }
        let table = b.build();
        let questions = extract_questions(&table, &[]);
        let options = DisplayOptions::new(false, 3).unwrap();
        let report = analyze_question(&table, &questions[0], &options, &DetectionRules::default());
        match report.content {
            QuestionContent::Distribution { full, display } => {
                assert_eq!(full.len(), 5);
                assert_eq!(display.len(), 4);
                assert_eq!(display.get(OTHER_LABEL), Some(3));
                assert_eq!(full.total(), display.total());
            }
            c => panic!("unexpected content {:?}", c),
        }
    }

    #[test]
    fn top_n_is_bounded() {
        assert_eq!(DisplayOptions::new(false, 2), Err(TallyErrors::InvalidTopN(2)));
        assert_eq!(DisplayOptions::new(false, 16), Err(TallyErrors::InvalidTopN(16)));
        assert!(DisplayOptions::new(true, 15).is_ok());
        assert_eq!(DisplayOptions::default().top_n, 8);
    }
}
