use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use survey_tally::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::survey::config_reader::*;
use crate::survey::io_common::{guess_input_type, simplify_file_name};

mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;

#[derive(Debug, Snafu)]
pub enum SurveyError {
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No worksheet in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Worksheet {name:?} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Error opening CSV file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("No header row in {path}"))]
    MissingHeader { path: String },
    #[snafu(display("Invalid row at line {lineno} of {path}"))]
    InvalidRow {
        source: TallyErrors,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid display options"))]
    InvalidOptions { source: TallyErrors },
    #[snafu(display("Unknown input type {input_type:?} (expected xlsx or csv)"))]
    UnknownInputType { input_type: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SurveyResult<T> = Result<T, SurveyError>;

/// The sheet to read.
#[derive(Eq, PartialEq, Debug, Clone)]
struct InputSource {
    path: String,
    input_type: String,
    worksheet_name: Option<String>,
}

fn report_to_json(report: &QuestionReport) -> JSValue {
    let q = &report.question;
    let mut js = json!({
        "id": q.id,
        "title": q.display_title,
        "column": q.source_column,
        "anchor": q.anchor_id(),
        "type": report.question_type.as_str(),
        "chart": report.chart.as_str(),
    });
    match &report.content {
        QuestionContent::Distribution { full, display } => {
            js["stats"] = JSValue::Array(distribution_to_json(full));
            js["display"] = JSValue::Array(distribution_to_json(display));
        }
        QuestionContent::Listing(answers) => {
            js["responses"] = json!(answers.len());
            js["answers"] = json!(answers);
        }
    }
    js
}

fn distribution_to_json(d: &FrequencyDistribution) -> Vec<JSValue> {
    d.percentages()
        .into_iter()
        .map(|(label, count, percent)| json!({"label": label, "count": count, "percent": percent}))
        .collect()
}

fn respondent_to_json(answers: &RespondentAnswers) -> JSValue {
    let l: Vec<JSValue> = answers
        .answers
        .iter()
        .map(|(q, a)| json!({"question": q.display_title, "answer": a}))
        .collect();
    json!({
        "id": answers.respondent_id,
        "matchedRows": answers.matched_rows,
        "answers": l,
    })
}

fn read_sheet(source: &InputSource) -> SurveyResult<(ResponseTable, Option<String>)> {
    info!("Attempting to read survey file {:?}", source.path);
    match source.input_type.as_str() {
        "xlsx" => {
            let (table, name) =
                io_excel::read_excel_sheet(&source.path, source.worksheet_name.as_deref())?;
            Ok((table, Some(name)))
        }
        "csv" => {
            if source.worksheet_name.is_some() {
                warn!("read_sheet: worksheet name ignored for CSV input");
            }
            Ok((io_csv::read_csv_sheet(&source.path)?, None))
        }
        x => UnknownInputTypeSnafu { input_type: x }.fail(),
    }
}

fn resolve_input(args: &Args, config: &SurveyConfig, root: Option<&Path>) -> SurveyResult<InputSource> {
    let path: String = match (&args.input, &config.file_path) {
        (Some(p), _) => p.clone(),
        (None, Some(p)) => {
            let full: PathBuf = match root {
                Some(r) => r.join(p),
                None => PathBuf::from(p),
            };
            full.as_path().display().to_string()
        }
        (None, None) => whatever!("No input file: use --input or filePath in the configuration"),
    };
    let input_type = args
        .input_type
        .clone()
        .or_else(|| config.input_type.clone())
        .unwrap_or_else(|| guess_input_type(&path).to_string());
    Ok(InputSource {
        path,
        input_type,
        worksheet_name: args
            .worksheet
            .clone()
            .or_else(|| config.worksheet_name.clone()),
    })
}

/// Runs the whole analysis and returns the summary that was written out.
pub fn run_survey(args: &Args) -> SurveyResult<JSValue> {
    let (config, root) = match &args.config {
        Some(p) => {
            let root = Path::new(p).parent().map(|r| r.to_path_buf());
            (read_config(p)?, root)
        }
        None => (SurveyConfig::default(), None),
    };
    info!("config: {:?}", config);

    let source = resolve_input(args, &config, root.as_deref())?;
    debug!("run_survey: source: {:?}", source);

    if args.list_sheets {
        if source.input_type != "xlsx" {
            whatever!("Only Excel inputs have worksheets");
        }
        let names = io_excel::list_worksheets(&source.path)?;
        for n in names.iter() {
            println!("{}", n);
        }
        return Ok(json!(names));
    }

    let options = config.display_options(args.include_blank, args.top_n)?;
    let filter_rules = config.filter_rules();
    let detection_rules = config.detection_rules();

    let (raw_table, worksheet) = read_sheet(&source)?;
    let table = filter_test_responses(&raw_table, &filter_rules);
    info!(
        "Responses included in the analysis: {} ({} test responses excluded)",
        table.len(),
        raw_table.len() - table.len()
    );

    if args.list_respondents {
        let id_column = config.respondent_column();
        let ids = match respondent_ids(&table, &id_column) {
            Some(ids) => ids,
            None => {
                warn!("No respondent column {:?} in {:?}", id_column, source.path);
                Vec::new()
            }
        };
        for id in ids.iter() {
            println!("{}", id);
        }
        return Ok(json!(ids));
    }

    let questions = extract_questions(&table, &config.meta_columns());
    let reports = analyze(&table, &questions, &options, &detection_rules);

    let questions_js: Vec<JSValue> = reports.iter().map(report_to_json).collect();
    let mut summary = json!({
        "config": {
            "source": simplify_file_name(&source.path),
            "worksheet": worksheet,
            "responses": table.len(),
            "excludedResponses": raw_table.len() - table.len(),
            "includeBlank": options.include_blank,
            "topN": options.top_n,
        },
        "questions": questions_js,
    });

    if let Some(respondent_id) = &args.respondent {
        let id_column = config.respondent_column();
        summary["respondent"] =
            match lookup_respondent(&table, &id_column, respondent_id, &questions) {
                Ok(answers) => respondent_to_json(&answers),
                Err(e) => {
                    warn!("Respondent lookup not available: {}", e);
                    JSValue::Null
                }
            };
    }

    let pretty_js_stats = serde_json::to_string_pretty(&summary).context(SerializingJsonSnafu {})?;
    match args.out.as_deref() {
        None | Some("stdout") => println!("{}", pretty_js_stats),
        Some(path) => {
            fs::write(path, &pretty_js_stats).context(WritingOutputSnafu { path })?;
            info!("Summary written to {:?}", path);
        }
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(SerializingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(summary)
}
