// Primitives for reading CSV files.

use std::fs::File;

use crate::survey::{io_common::text_cell, *};

/// Reads a CSV file with a header row.
///
/// Rows without any value are skipped.
pub fn read_csv_sheet(path: &str) -> SurveyResult<ResponseTable> {
    let mut records = get_records(path)?;

    let header: Vec<String> = match records.next() {
        Some(line_r) => line_r
            .context(CsvLineParseSnafu { path, lineno: 1_usize })?
            .iter()
            .map(|s| s.trim().to_string())
            .collect(),
        None => return MissingHeaderSnafu { path }.fail(),
    };
    debug!("read_csv_sheet: header: {:?}", header);

    let mut builder = TableBuilder::new(&header);
    for (idx, line_r) in records.enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        let cells: Vec<Cell> = line.iter().map(text_cell).collect();
        if cells.iter().all(|c| c.is_missing()) {
            debug!("read_csv_sheet: skipping empty line {}", lineno);
            continue;
        }
        builder
            .add_row(cells)
            .context(InvalidRowSnafu { path, lineno })?;
    }
    let table = builder.build();
    info!("read_csv_sheet: {} rows from {:?}", table.len(), path);
    Ok(table)
}

fn get_records(path: &str) -> SurveyResult<csv::StringRecordsIntoIter<File>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(OpeningCsvSnafu { path })?;
    Ok(rdr.into_records())
}
