use super::*;

#[test]
fn plain_fields_are_unquoted() {
    let csv = to_csv(&["Name", "Total"], &[vec!["Ravi".to_owned(), "42".to_owned()]]);
    assert_eq!(csv, "Name,Total\r\nRavi,42\r\n");
}

#[test]
fn commas_quotes_and_newlines_are_quoted() {
    let csv = to_csv(
        &["Note"],
        &[vec!["a,b".to_owned()], vec!["say \"hi\"".to_owned()], vec!["two\nlines".to_owned()]],
    );
    assert_eq!(csv, "Note\r\n\"a,b\"\r\n\"say \"\"hi\"\"\"\r\n\"two\nlines\"\r\n");
}

#[test]
fn header_only_when_no_rows() {
    assert_eq!(to_csv(&["A", "B"], &[]), "A,B\r\n");
}
