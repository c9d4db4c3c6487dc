// Primitives for reading the answer sheet.

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use std::path::Path;

use crate::remap::*;

pub fn check_extension(path: &Path) -> RunResult<()> {
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);
    ensure!(
        is_xlsx,
        WrongExtensionSnafu {
            path: path.display().to_string()
        }
    );
    Ok(())
}

/// Reads the first worksheet of a workbook. Other worksheets are ignored.
pub fn read_first_sheet(path: &Path) -> RunResult<Table> {
    let p = path.display().to_string();
    debug!("read_first_sheet: path: {:?}", &p);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path: p.clone() })?;
    if let Some(name) = workbook.sheet_names().first() {
        debug!("read_first_sheet: worksheet: {:?}", name);
    }
    let wrange = workbook
        .worksheet_range_at(0)
        .context(EmptyExcelSnafu { path: p.clone() })?
        .context(OpeningExcelSnafu { path: p })?;

    let table = range_to_table(&wrange);
    if let Some(header) = table.first() {
        debug!("read_first_sheet: header: {:?}", header);
    }
    Ok(table)
}

/// Converts a calamine range into rows of cells.
///
/// The range only covers the used cells. Leading empty columns are added back so
/// that column positions match the sheet.
pub fn range_to_table(range: &Range<DataType>) -> Table {
    let leading_cols = range.start().map(|(_, col)| col as usize).unwrap_or(0);
    range
        .rows()
        .map(|row| {
            let mut cells: Vec<Cell> = vec![Cell::Empty; leading_cols];
            cells.extend(row.iter().map(read_cell));
            cells
        })
        .collect()
}

fn read_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::String(s) => Cell::Text(s.clone()),
        DataType::Float(f) => Cell::Number(*f),
        DataType::Int(i) => Cell::Number(*i as f64),
        DataType::DateTime(f) => Cell::Number(*f),
        DataType::Bool(b) => Cell::Bool(*b),
        DataType::Empty => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}
