use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use chrono::Duration;

use crate::survey::{io_common::text_cell, *};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn list_worksheets(path: &str) -> SurveyResult<Vec<String>> {
    let workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    Ok(workbook.sheet_names().to_vec())
}

/// Reads one worksheet. Returns the table and the name of the worksheet.
///
/// The first row holds the names of the columns. Rows without any value are skipped.
pub fn read_excel_sheet(
    path: &str,
    worksheet_name: Option<&str>,
) -> SurveyResult<(ResponseTable, String)> {
    let (name, wrange) = get_range(path, worksheet_name)?;

    let mut iter = wrange.rows();
    let header: Vec<String> = iter
        .next()
        .context(MissingHeaderSnafu { path })?
        .iter()
        .map(|c| read_cell(c).as_answer().unwrap_or_default().trim().to_string())
        .collect();
    debug!("read_excel_sheet: header: {:?}", header);

    let mut builder = TableBuilder::new(&header);
    for (idx, row) in iter.enumerate() {
        let lineno = idx + 2;
        let cells: Vec<Cell> = row.iter().map(read_cell).collect();
        if cells.iter().all(|c| c.is_missing()) {
            debug!("read_excel_sheet: skipping empty row {}", lineno);
            continue;
        }
        builder
            .add_row(cells)
            .context(InvalidRowSnafu { path, lineno })?;
    }
    let table = builder.build();
    info!(
        "read_excel_sheet: {} rows from {:?} worksheet {:?}",
        table.len(),
        path,
        name
    );
    Ok((table, name))
}

fn read_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::Empty => Cell::Missing,
        DataType::String(s) => text_cell(s),
        DataType::Float(f) => Cell::from(*f),
        DataType::Int(i) => Cell::Number(*i as f64),
        DataType::DateTime(f) => match cell.as_datetime() {
            // Rounded to the nearest second, the serial number is not exact.
            Some(dt) => Cell::Text(
                (dt + Duration::milliseconds(500))
                    .format(DATETIME_FORMAT)
                    .to_string(),
            ),
            None => Cell::from(*f),
        },
        // Booleans and errors, as displayed.
        other => Cell::Text(other.to_string()),
    }
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> SurveyResult<(String, Range<DataType>)> {
    debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet_name);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    let name = if let Some(n) = worksheet_name {
        n.to_string()
    } else {
        let all_names: Vec<String> = workbook.sheet_names().to_vec();
        match all_names.as_slice() {
            [] => return EmptyExcelSnafu { path }.fail(),
            [n] => n.clone(),
            [n, ..] => {
                info!(
                    "get_range: {} worksheets in {:?}, using the first one {:?}",
                    all_names.len(),
                    path,
                    n
                );
                n.clone()
            }
        }
    };
    let wrange = workbook
        .worksheet_range(&name)
        .context(MissingWorksheetSnafu {
            name: name.clone(),
            path,
        })?
        .context(OpeningExcelSnafu { path })?;
    Ok((name, wrange))
}
