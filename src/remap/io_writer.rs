// Writing the processed sheet.

use std::path::Path;

use umya_spreadsheet::Spreadsheet;

use crate::remap::io_common::column_widths;
use crate::remap::*;

/// Builds a workbook with a single worksheet holding the table.
///
/// Column widths follow the longest text of each column, see [`column_widths`].
pub fn build_workbook(table: &Table, sheet_name: &str) -> RunResult<Spreadsheet> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let sheet = match book.new_sheet(sheet_name) {
        Ok(sheet) => sheet,
        Err(msg) => whatever!("Cannot create worksheet {:?}: {}", sheet_name, msg),
    };

    for (r, row) in table.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            // Coordinates are (column, row), starting at 1.
            let coord = ((c + 1) as u32, (r + 1) as u32);
            match cell {
                Cell::Empty => {}
                Cell::Text(s) => {
                    sheet.get_cell_mut(coord).set_value_string(s.clone());
                }
                Cell::Number(n) => {
                    sheet.get_cell_mut(coord).set_value_number(*n);
                }
                Cell::Bool(b) => {
                    sheet.get_cell_mut(coord).set_value_bool(*b);
                }
            }
        }
    }

    for (idx, width) in column_widths(table).iter().enumerate() {
        sheet
            .get_column_dimension_by_number_mut(&((idx + 1) as u32))
            .set_width(*width as f64);
    }
    Ok(book)
}

pub fn write_table(table: &Table, sheet_name: &str, path: &Path) -> RunResult<()> {
    let book = build_workbook(table, sheet_name)?;
    debug!(
        "write_table: path: {:?} rows: {:?}",
        path.display(),
        table.len()
    );
    umya_spreadsheet::writer::xlsx::write(&book, path).context(WritingExcelSnafu {
        path: path.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook, Reader, Xlsx};

    #[test]
    fn written_sheet_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("out.xlsx");
        let table: Table = vec![
            vec!["Name".into(), "Class".into(), "A".into(), "A".into(), "NILAI".into()],
            vec![
                "Alice".into(),
                Cell::Number(7.0),
                "A".into(),
                "A".into(),
                "1/1".into(),
            ],
        ];
        write_table(&table, RunSettings::DEFAULT_SHEET_NAME, &p).unwrap();

        let workbook: Xlsx<_> = open_workbook(&p).unwrap();
        assert_eq!(workbook.sheet_names().to_vec(), vec!["Processed Data".to_string()]);

        let read = io_xlsx::read_first_sheet(&p).unwrap();
        assert_eq!(read, table);
    }

    #[test]
    fn write_errors_carry_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("no_such_dir").join("out.xlsx");
        let table: Table = vec![vec!["Name".into(), "Class".into()]];
        match write_table(&table, "Processed Data", &p) {
            Err(RemapError::WritingExcel { path, .. }) => {
                assert_eq!(path, p.display().to_string())
            }
            other => panic!("unexpected result {:?}", other.map(|_| ())),
        }
    }
}
