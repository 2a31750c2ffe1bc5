use std::path::Path;

use survey_tally::Cell;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// A text cell as read from a file. Empty strings are missing answers.
pub fn text_cell(s: &str) -> Cell {
    if s.is_empty() {
        Cell::Missing
    } else {
        Cell::Text(s.to_string())
    }
}

/// The input type deduced from the file extension.
pub fn guess_input_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("xlsx") | Some("xlsm") => "xlsx",
        _ => "csv",
    }
}
