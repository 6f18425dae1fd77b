use super::*;

fn input() -> StudentInput {
    StudentInput {
        name: " Ravi ".to_owned(),
        roll_no: "12".to_owned(),
        email: String::new(),
        class_name: "10".to_owned(),
        section: "B ".to_owned(),
    }
}

#[test]
fn validate_student_trims_fields() {
    let out = validate_student(&input()).unwrap();
    assert_eq!(out.name, "Ravi");
    assert_eq!(out.section, "B");
}

#[test]
fn validate_student_requires_core_fields() {
    let mut i = input();
    i.roll_no = "  ".to_owned();
    assert_eq!(validate_student(&i).unwrap_err(), "Name, roll number and class are required.");

    let mut i = input();
    i.email = "ravi".to_owned();
    assert_eq!(validate_student(&i).unwrap_err(), "Enter a valid email address.");
}

#[test]
fn import_message_prefers_backend_text() {
    let summary = ImportSummary { inserted: 3, skipped: 1, message: None };
    assert_eq!(import_message(&summary), "Imported 3 student(s), skipped 1.");
    let summary = ImportSummary { message: Some("Roster updated".to_owned()), ..summary };
    assert_eq!(import_message(&summary), "Roster updated");
}

#[test]
fn report_file_name_uses_roll_number() {
    let s = Student { id: "abc".to_owned(), roll_no: "12".to_owned(), ..Student::default() };
    assert_eq!(report_file_name(&s), "report-12.pdf");
    let s = Student { id: "abc".to_owned(), ..Student::default() };
    assert_eq!(report_file_name(&s), "report-abc.pdf");
}
