//! Spreadsheet access.
//!
//! A `Workbook` holds every sheet of a schedule file as a dense grid
//! anchored at A1, so rows and columns can be addressed the way the sheets
//! are laid out (1-based, like the spreadsheet UI).

mod cell;
pub mod tables;

use std::path::Path;

use calamine::{Data, DataType, Reader, open_workbook_auto};
use chrono::NaiveDateTime;

use crate::error::{SchedGenError, SchedGenResult};

pub use cell::Cell;
pub use tables::{SheetLayout, Tables};

#[derive(Debug, Clone)]
struct Sheet {
    name: String,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    fn cell(&self, row: usize, col: usize) -> Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .cloned()
            .unwrap_or_default()
    }

    fn last_row(&self) -> u32 {
        self.rows
            .iter()
            .rposition(|row| row.iter().any(|c| !c.is_empty()))
            .map(|i| i as u32 + 1)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Read every sheet of an .xlsx, .xlsm, .xls or .ods file.
    pub fn open(path: &Path) -> SchedGenResult<Self> {
        let mut workbook = open_workbook_auto(path).map_err(|e| {
            SchedGenError::Workbook(format!("Could not open {}: {e}", path.display()))
        })?;

        let mut sheets = Vec::new();

        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|e| SchedGenError::Workbook(format!("Could not read sheet '{name}': {e}")))?;

            let mut rows: Vec<Vec<Cell>> = Vec::new();

            if let (Some((start_row, start_col)), Some((end_row, end_col))) =
                (range.start(), range.end())
            {
                let height = end_row as usize + 1;
                let width = end_col as usize + 1;
                rows = vec![vec![Cell::Empty; width]; height];

                for (row, col, data) in range.cells() {
                    rows[start_row as usize + row][start_col as usize + col] = to_cell(data);
                }
            }

            tracing::debug!(sheet = %name, rows = rows.len(), "read sheet");
            sheets.push(Sheet { name, rows });
        }

        Ok(Workbook { sheets })
    }

    /// Build a workbook from in-memory grids (first row is row 1).
    pub fn from_sheets<N: Into<String>>(sheets: impl IntoIterator<Item = (N, Vec<Vec<Cell>>)>) -> Self {
        Workbook {
            sheets: sheets
                .into_iter()
                .map(|(name, rows)| Sheet {
                    name: name.into(),
                    rows,
                })
                .collect(),
        }
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// 1-based index of the last row holding a value (0 for an empty sheet).
    pub fn last_row(&self, sheet: &str) -> SchedGenResult<u32> {
        Ok(self.sheet(sheet)?.last_row())
    }

    /// Read a block of `rows` x `cols` cells whose top-left corner is
    /// (`row`, `col`), both 1-based. Cells outside the sheet are empty.
    pub fn range(
        &self,
        sheet: &str,
        row: u32,
        col: u32,
        rows: u32,
        cols: u32,
    ) -> SchedGenResult<Vec<Vec<Cell>>> {
        let sheet = self.sheet(sheet)?;
        let first_row = row.saturating_sub(1) as usize;
        let first_col = col.saturating_sub(1) as usize;

        Ok((first_row..first_row + rows as usize)
            .map(|r| {
                (first_col..first_col + cols as usize)
                    .map(|c| sheet.cell(r, c))
                    .collect()
            })
            .collect())
    }

    fn sheet(&self, name: &str) -> SchedGenResult<&Sheet> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| SchedGenError::SheetNotFound(name.to_string()))
    }
}

/// Date and time cells are converted by calamine, which knows the
/// workbook's date system and the ISO forms .ods files store.
fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => data
            .as_datetime()
            .map(Cell::DateTime)
            .or_else(|| data.as_date().map(|d| Cell::DateTime(NaiveDateTime::from(d))))
            .or_else(|| data.as_time().map(Cell::Time))
            .unwrap_or_else(|| Cell::Text(data.to_string())),
        Data::DurationIso(_) => data
            .as_time()
            .map(Cell::Time)
            .unwrap_or_else(|| Cell::Text(data.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};
    use chrono::{NaiveDate, NaiveTime};

    fn workbook() -> Workbook {
        Workbook::from_sheets([(
            "Dates",
            vec![
                vec![Cell::Empty, Cell::text("Date"), Cell::text("Color")],
                vec![Cell::Empty, Cell::Number(43164.0), Cell::text("blue")],
                vec![],
                vec![Cell::text("   ")],
            ],
        )])
    }

    #[test]
    fn test_last_row_ignores_blank_rows() {
        assert_eq!(workbook().last_row("Dates").unwrap(), 2);
    }

    #[test]
    fn test_range_is_one_based_and_padded() {
        let cells = workbook().range("Dates", 2, 2, 2, 3).unwrap();

        assert_eq!(
            cells,
            vec![
                vec![Cell::Number(43164.0), Cell::text("blue"), Cell::Empty],
                vec![Cell::Empty, Cell::Empty, Cell::Empty],
            ]
        );
    }

    #[test]
    fn test_missing_sheet() {
        let err = workbook().range("Personal Schedule", 1, 1, 1, 1).unwrap_err();
        assert!(matches!(err, SchedGenError::SheetNotFound(name) if name == "Personal Schedule"));
    }

    #[test]
    fn test_serial_date_cells() {
        let day = NaiveDate::from_ymd_opt(2018, 3, 5).unwrap();
        let serial = Data::DateTime(ExcelDateTime::new(43164.75, ExcelDateTimeType::DateTime, false));

        let cell = to_cell(&serial);
        assert_eq!(cell.as_date(), Some(day));
        assert_eq!(cell.as_time(), NaiveTime::from_hms_opt(18, 0, 0));
    }

    #[test]
    fn test_1904_date_cells() {
        // Same day counted from 1904-01-01
        let serial = Data::DateTime(ExcelDateTime::new(41702.0, ExcelDateTimeType::DateTime, true));

        assert_eq!(to_cell(&serial).as_date(), NaiveDate::from_ymd_opt(2018, 3, 5));
    }

    #[test]
    fn test_iso_date_cells() {
        let day = NaiveDate::from_ymd_opt(2018, 3, 5);

        assert_eq!(to_cell(&Data::DateTimeIso("2018-03-05".into())).as_date(), day);

        let cell = to_cell(&Data::DateTimeIso("2018-03-05T08:00:00".into()));
        assert_eq!(cell.as_date(), day);
        assert_eq!(cell.as_time(), NaiveTime::from_hms_opt(8, 0, 0));
    }

    #[test]
    fn test_iso_duration_cells() {
        let cell = to_cell(&Data::DurationIso("PT08H55M00S".into()));

        assert_eq!(cell, Cell::time(NaiveTime::from_hms_opt(8, 55, 0).unwrap()));
        assert_eq!(cell.as_date(), None);
    }
}
