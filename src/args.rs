use clap::Parser;

/// This is a tabulation program for survey responses.
///
/// It classifies every question of a response sheet (single choice, multiple choice
/// or free text) and counts the answers.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The survey responses, as an Excel workbook (.xlsx) or a CSV file.
    /// Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (xlsx or csv, optional) The type of the input. By default, it is deduced from the
    /// extension of the file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (optional) When using an Excel file, the name of the worksheet to use. By default,
    /// the first worksheet.
    #[clap(long, value_parser)]
    pub worksheet: Option<String>,

    /// (file path, optional) A JSON file with the analysis options. See the manual for
    /// the available keys.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, 'stdout' or empty) Where to write the summary in JSON format.
    /// It is printed to the standard output by default.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, survtab will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, missing answers are counted as 'Blank'.
    #[clap(long, takes_value = false)]
    pub include_blank: bool,

    /// (3 to 15, default 8) The number of answers shown individually in the charts.
    /// The other answers are grouped under 'Other'.
    #[clap(long, value_parser)]
    pub top_n: Option<usize>,

    /// (optional) The identifier of a respondent whose answers should be included
    /// in the summary.
    #[clap(long, value_parser)]
    pub respondent: Option<String>,

    /// If passed as an argument, only lists the worksheets of the Excel file.
    #[clap(long, takes_value = false)]
    pub list_sheets: bool,

    /// If passed as an argument, only lists the identifiers of the respondents, after
    /// the test responses are removed.
    #[clap(long, takes_value = false)]
    pub list_respondents: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
