use crate::survey::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

/// The optional JSON configuration file. Every key may be omitted.
#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Relative to the directory of the configuration file.
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "inputType")]
    pub input_type: Option<String>,
    #[serde(rename = "worksheetName")]
    pub worksheet_name: Option<String>,
    #[serde(rename = "metaColumns")]
    pub meta_columns: Option<Vec<String>>,
    #[serde(rename = "contactColumn")]
    pub contact_column: Option<String>,
    #[serde(rename = "excludeContactKeywords")]
    pub exclude_contact_keywords: Option<Vec<String>>,
    #[serde(rename = "respondentColumn")]
    pub respondent_column: Option<String>,
    #[serde(rename = "includeBlank")]
    pub include_blank: Option<bool>,
    #[serde(rename = "topN")]
    pub top_n: Option<usize>,
    #[serde(rename = "contactMarker")]
    pub contact_marker: Option<String>,
    #[serde(rename = "textHints")]
    pub text_hints: Option<Vec<String>>,
    #[serde(rename = "multiSelectMarker")]
    pub multi_select_marker: Option<String>,
    #[serde(rename = "longTextThreshold")]
    pub long_text_threshold: Option<f64>,
}

impl SurveyConfig {
    pub fn meta_columns(&self) -> Vec<String> {
        self.meta_columns
            .clone()
            .unwrap_or_else(default_meta_columns)
    }

    pub fn respondent_column(&self) -> String {
        self.respondent_column
            .clone()
            .unwrap_or_else(|| DEFAULT_RESPONDENT_COLUMN.to_string())
    }

    pub fn filter_rules(&self) -> FilterRules {
        let default = FilterRules::default();
        FilterRules {
            contact_column: self
                .contact_column
                .clone()
                .unwrap_or(default.contact_column),
            exclude_keywords: self
                .exclude_contact_keywords
                .clone()
                .unwrap_or(default.exclude_keywords),
        }
    }

    pub fn detection_rules(&self) -> DetectionRules {
        let default = DetectionRules::default();
        DetectionRules {
            contact_marker: self
                .contact_marker
                .clone()
                .unwrap_or(default.contact_marker),
            text_hints: self.text_hints.clone().unwrap_or(default.text_hints),
            multi_select_marker: self
                .multi_select_marker
                .clone()
                .unwrap_or(default.multi_select_marker),
            long_text_threshold: self
                .long_text_threshold
                .unwrap_or(default.long_text_threshold),
        }
    }

    /// The command line values take precedence over the file.
    pub fn display_options(
        &self,
        include_blank_flag: bool,
        top_n_flag: Option<usize>,
    ) -> SurveyResult<DisplayOptions> {
        let default = DisplayOptions::default();
        let include_blank = include_blank_flag || self.include_blank.unwrap_or(default.include_blank);
        let top_n = top_n_flag.or(self.top_n).unwrap_or(default.top_n);
        DisplayOptions::new(include_blank, top_n).context(InvalidOptionsSnafu {})
    }
}

pub fn read_config(path: &str) -> SurveyResult<SurveyConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: SurveyConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

/// Reads a summary previously written by this program.
pub fn read_summary(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}
