// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// The content of one cell of the response sheet.
///
/// Readers are expected to map blank cells (and NaN numbers) to `Missing`.
#[derive(PartialEq, Debug, Clone)]
pub enum Cell {
    /// No answer was recorded.
    Missing,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// The answer as a string, or `None` for a missing cell.
    ///
    /// Integral numbers are printed without a fractional part (`3`, not `3.0`).
    pub fn as_answer(&self) -> Option<String> {
        match self {
            Cell::Missing => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) => Some(n.to_string()),
        }
    }

    /// The form used when matching exclusion keywords. A missing cell still
    /// yields a comparable string.
    pub fn as_filter_string(&self) -> String {
        self.as_answer().unwrap_or_else(|| "nan".to_string())
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }
}

impl From<Option<&str>> for Cell {
    fn from(s: Option<&str>) -> Cell {
        match s {
            Some(x) => Cell::Text(x.to_string()),
            None => Cell::Missing,
        }
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Cell {
        if n.is_nan() {
            Cell::Missing
        } else {
            Cell::Number(n)
        }
    }
}

// ******** Output data structures *********

/// The label used for missing answers when they are counted explicitly.
pub const BLANK_LABEL: &str = "Blank";

/// The label of the bucket gathering the entries cut by the display reduction.
pub const OTHER_LABEL: &str = "Other";

/// The answer shown in a respondent lookup when a cell is missing.
pub const NO_RESPONSE: &str = "(no response)";

/// One answerable question of the survey.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Question {
    /// Starts at 1, dense and in column order.
    pub id: u32,
    /// The name of the column in the sheet.
    pub source_column: String,
    /// `Q{id}. ` followed by the column name without any previous label.
    pub display_title: String,
}

impl Question {
    /// The identifier used by navigation links.
    pub fn anchor_id(&self) -> String {
        format!("q{}", self.id)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum QuestionType {
    /// Open-ended answers, listed as they are.
    Text,
    SingleSelect,
    /// Several options per answer, separated by `|`.
    MultiSelect,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::SingleSelect => "single",
            QuestionType::MultiSelect => "multi",
        }
    }
}

/// How the results of a question are presented.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ChartKind {
    Pie,
    TextList,
}

impl ChartKind {
    pub fn for_question_type(question_type: QuestionType) -> ChartKind {
        match question_type {
            QuestionType::Text => ChartKind::TextList,
            QuestionType::SingleSelect | QuestionType::MultiSelect => ChartKind::Pie,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Pie => "pie",
            ChartKind::TextList => "text",
        }
    }
}

/// Answer labels with their counts, by decreasing count.
///
/// Labels with the same count keep the order in which they were first seen.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct FrequencyDistribution {
    pub(crate) entries: Vec<(String, u64)>,
}

impl FrequencyDistribution {
    /// Builds a distribution from labels in encounter order.
    pub fn from_labels<I: IntoIterator<Item = String>>(labels: I) -> FrequencyDistribution {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<(String, u64)> = Vec::new();
        for label in labels {
            if let Some(pos) = positions.get(&label) {
                entries[*pos].1 += 1;
            } else {
                positions.insert(label.clone(), entries.len());
                entries.push((label, 1));
            }
        }
        // Stable sort: the ties stay in encounter order.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        FrequencyDistribution { entries }
    }

    /// Takes entries that are already in display order.
    pub fn from_entries(entries: Vec<(String, u64)>) -> FrequencyDistribution {
        FrequencyDistribution { entries }
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| *c).sum()
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
    }

    /// (label, count, percent of the total rounded to 2 decimals)
    pub fn percentages(&self) -> Vec<(String, u64, f64)> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        self.entries
            .iter()
            .map(|(label, count)| {
                let pct = (*count as f64) / (total as f64) * 100.0;
                (label.clone(), *count, (pct * 100.0).round() / 100.0)
            })
            .collect()
    }
}

// ********* Configuration **********

pub const MIN_TOP_N: usize = 3;
pub const MAX_TOP_N: usize = 15;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct DisplayOptions {
    /// Count missing answers under the `Blank` label instead of dropping them.
    pub include_blank: bool,
    /// Number of entries kept by the display reduction.
    pub top_n: usize,
}

impl DisplayOptions {
    pub const DEFAULT_OPTIONS: DisplayOptions = DisplayOptions {
        include_blank: false,
        top_n: 8,
    };

    pub fn new(include_blank: bool, top_n: usize) -> Result<DisplayOptions, TallyErrors> {
        if !(MIN_TOP_N..=MAX_TOP_N).contains(&top_n) {
            return Err(TallyErrors::InvalidTopN(top_n));
        }
        Ok(DisplayOptions {
            include_blank,
            top_n,
        })
    }
}

impl Default for DisplayOptions {
    fn default() -> Self {
        DisplayOptions::DEFAULT_OPTIONS
    }
}

/// The heuristics used to classify the questions.
///
/// The default values are tuned to Korean survey phrasing.
#[derive(PartialEq, Debug, Clone)]
pub struct DetectionRules {
    /// A title containing this marker asks for contact details (free text).
    pub contact_marker: String,
    /// Phrases of open-ended prompts.
    pub text_hints: Vec<String>,
    /// A title containing this marker allows several selections.
    pub multi_select_marker: String,
    /// Mean answer length (in characters) above which a question is free text.
    pub long_text_threshold: f64,
}

impl Default for DetectionRules {
    fn default() -> Self {
        DetectionRules {
            contact_marker: "연락처".to_string(),
            text_hints: ["적어", "순서대로", "떠올려", "사례", "문의/불만", "기준", "어떻게"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            multi_select_marker: "최대".to_string(),
            long_text_threshold: 80.0,
        }
    }
}

/// Which rows are test or internal submissions.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FilterRules {
    pub contact_column: String,
    pub exclude_keywords: Vec<String>,
}

impl Default for FilterRules {
    fn default() -> Self {
        FilterRules {
            contact_column: "연락처(이메일/전화번호)".to_string(),
            exclude_keywords: vec!["test".to_string(), "테스트".to_string()],
        }
    }
}

pub fn default_meta_columns() -> Vec<String> {
    ["참여자", "응답일시", "제출일시", "Timestamp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub const DEFAULT_RESPONDENT_COLUMN: &str = "참여자";

// ********* Errors **********

/// Errors when building tables or options.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TallyErrors {
    InvalidTopN(usize),
    RowTooLong {
        row: usize,
        len: usize,
        expected: usize,
    },
}

impl Error for TallyErrors {}

impl Display for TallyErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TallyErrors::InvalidTopN(n) => write!(
                f,
                "top_n must be between {} and {}, got {}",
                MIN_TOP_N, MAX_TOP_N, n
            ),
            TallyErrors::RowTooLong { row, len, expected } => write!(
                f,
                "row {} has {} cells but the header has {} columns",
                row, len, expected
            ),
        }
    }
}

/// Why a respondent lookup is not available.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum LookupError {
    MissingIdColumn(String),
    NotFound(String),
}

impl Error for LookupError {}

impl Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::MissingIdColumn(c) => write!(f, "no respondent column '{}'", c),
            LookupError::NotFound(id) => write!(f, "no responses for respondent '{}'", id),
        }
    }
}
