//! Table exports offered from the marks and attendance screens.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every export starts from the `(header, rows)` pair a screen already
//! renders, so a file always holds exactly what is on screen. Excel
//! workbooks and CSV are built in the browser; PDF reports come from the
//! backend and bypass this module.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use super::csv::{CSV_MIME, to_csv};
use super::download::download_bytes;
use super::xlsx::{XLSX_MIME, to_xlsx};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => XLSX_MIME,
            ExportFormat::Csv => CSV_MIME,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("could not build the workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("the browser refused the download")]
    Download,
}

impl ExportError {
    /// Text for the screen's error line.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExportError::Workbook(_) => "Could not build the spreadsheet.",
            ExportError::Download => "Download failed.",
        }
    }
}

/// File name for an export, e.g. `marks-maths.xlsx`.
pub fn export_file_name(prefix: &str, qualifier: &str, format: ExportFormat) -> String {
    let slug: String = qualifier
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let slug = slug.trim_matches('-');
    let ext = format.extension();
    if slug.is_empty() { format!("{prefix}.{ext}") } else { format!("{prefix}-{slug}.{ext}") }
}

/// Encode a table. `sheet_name` names the worksheet of an Excel export.
///
/// # Errors
///
/// Returns `ExportError::Workbook` when the workbook writer rejects the input.
pub fn render<S: AsRef<str>>(
    format: ExportFormat,
    sheet_name: &str,
    header: &[S],
    rows: &[Vec<String>],
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Xlsx => Ok(to_xlsx(sheet_name, header, rows)?),
        ExportFormat::Csv => Ok(to_csv(header, rows).into_bytes()),
    }
}

/// Render and hand the file to the browser as `<prefix>-<qualifier>.<ext>`.
///
/// # Errors
///
/// Fails when encoding fails or the browser refuses the download.
pub fn export_table<S: AsRef<str>>(
    format: ExportFormat,
    prefix: &str,
    qualifier: &str,
    header: &[S],
    rows: &[Vec<String>],
) -> Result<(), ExportError> {
    let bytes = render(format, prefix, header, rows)?;
    let name = export_file_name(prefix, qualifier, format);
    if download_bytes(&name, format.mime(), &bytes) {
        Ok(())
    } else {
        Err(ExportError::Download)
    }
}
