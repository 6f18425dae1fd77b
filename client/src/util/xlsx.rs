//! Excel workbook rendering for spreadsheet exports.

#[cfg(test)]
#[path = "xlsx_test.rs"]
mod xlsx_test;

use rust_xlsxwriter::{Format, Workbook, XlsxError};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Cell text written as a number so Excel can sum it.
///
/// Codes with a leading zero (roll number `007`) stay text.
pub fn numeric_cell(value: &str) -> Option<f64> {
    let value = value.trim();
    let leading_zero = value.len() > 1 && value.starts_with('0') && !value.starts_with("0.");
    if value.is_empty() || leading_zero {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn row_index(index: usize) -> Result<u32, XlsxError> {
    u32::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

fn column_index(index: usize) -> Result<u16, XlsxError> {
    u16::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

/// One bold header row plus data rows on a single worksheet named `sheet_name`.
///
/// # Errors
///
/// Returns the writer's error when the sheet name or a cell position is rejected.
pub fn to_xlsx<S: AsRef<str>>(sheet_name: &str, header: &[S], rows: &[Vec<String>]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, title) in header.iter().enumerate() {
        worksheet.write_string_with_format(0, column_index(col)?, title.as_ref(), &bold)?;
    }
    for (r, row) in rows.iter().enumerate() {
        let r = row_index(r + 1)?;
        for (c, cell) in row.iter().enumerate() {
            let c = column_index(c)?;
            match numeric_cell(cell) {
                Some(n) => worksheet.write_number(r, c, n)?,
                None => worksheet.write_string(r, c, cell)?,
            };
        }
    }

    workbook.save_to_buffer()
}
