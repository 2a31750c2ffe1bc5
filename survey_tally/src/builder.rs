use crate::config::*;

use log::{debug, warn};
use std::collections::HashMap;

/// The responses of one sheet: one row per respondent, one column per field.
///
/// All the rows have exactly one cell per column.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct ResponseTable {
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<Vec<Cell>>,
}

impl ResponseTable {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// The number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// The cells of a column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Keeps the rows accepted by the predicate, in order.
    pub(crate) fn retain_rows<F: Fn(&[Cell]) -> bool>(&self, keep: F) -> ResponseTable {
        ResponseTable {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| keep(row.as_slice()))
                .cloned()
                .collect(),
        }
    }
}

/// A builder for response tables.
///
/// ```
/// use survey_tally::builder::TableBuilder;
/// use survey_tally::{Cell, TallyErrors};
///
/// let mut builder = TableBuilder::new(&["참여자".to_string(), "Q1. 만족도".to_string()]);
/// builder.add_row(vec![Cell::from("kim"), Cell::from("좋음")])?;
/// builder.add_row(vec![Cell::from("lee")])?;
///
/// let table = builder.build();
/// assert_eq!(table.len(), 2);
/// # Ok::<(), TallyErrors>(())
/// ```
pub struct TableBuilder {
    _columns: Vec<String>,
    _rows: Vec<Vec<Cell>>,
}

impl TableBuilder {
    /// Blank names become `Unnamed: {index}`. Repeated names get a `.1`, `.2`, ... suffix.
    pub fn new(header: &[String]) -> TableBuilder {
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut columns: Vec<String> = Vec::new();
        for (idx, raw) in header.iter().enumerate() {
            let base = if raw.trim().is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                raw.clone()
            };
            let mut name = base.clone();
            if let Some(n) = seen.get(&base).cloned() {
                let mut k = n;
                while seen.contains_key(&name) {
                    name = format!("{}.{}", base, k);
                    k += 1;
                }
                warn!("TableBuilder: duplicate column {:?} renamed to {:?}", base, name);
                seen.insert(base.clone(), k);
            }
            seen.entry(name.clone()).or_insert(1);
            columns.push(name);
        }
        debug!("TableBuilder: columns: {:?}", columns);
        TableBuilder {
            _columns: columns,
            _rows: Vec::new(),
        }
    }

    /// Adds a row of cells. Missing trailing cells are filled with `Cell::Missing`.
    pub fn add_row(&mut self, mut cells: Vec<Cell>) -> Result<(), TallyErrors> {
        let expected = self._columns.len();
        if cells.len() > expected {
            return Err(TallyErrors::RowTooLong {
                row: self._rows.len() + 1,
                len: cells.len(),
                expected,
            });
        }
        cells.resize(expected, Cell::Missing);
        self._rows.push(cells);
        Ok(())
    }

    pub fn build(self) -> ResponseTable {
        ResponseTable {
            columns: self._columns,
            rows: self._rows,
        }
    }
}
