//! CSV rendering for spreadsheet exports.

#[cfg(test)]
#[path = "csv_test.rs"]
mod csv_test;

pub const CSV_MIME: &str = "text/csv;charset=utf-8";

fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

fn push_line<S: AsRef<str>>(out: &mut String, cells: &[S]) {
    let line: Vec<String> = cells.iter().map(|c| escape_field(c.as_ref())).collect();
    out.push_str(&line.join(","));
    out.push_str("\r\n");
}

/// Render a header row plus data rows. Rows are written as given; short rows are not padded.
pub fn to_csv<S: AsRef<str>>(header: &[S], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    push_line(&mut out, header);
    for row in rows {
        push_line(&mut out, row);
    }
    out
}
