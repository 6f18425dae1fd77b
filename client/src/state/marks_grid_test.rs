use super::*;

fn students() -> Vec<Student> {
    vec![
        Student { id: "s1".to_owned(), name: "Ravi".to_owned(), roll_no: "1".to_owned(), ..Student::default() },
        Student { id: "s2".to_owned(), name: "Priya".to_owned(), roll_no: "2".to_owned(), ..Student::default() },
    ]
}

fn grid() -> MarksGrid {
    let mut g = MarksGrid::new(&students(), 3);
    g.subject = "Maths".to_owned();
    g.exam = "Unit 1".to_owned();
    g
}

// =============================================================
// Shape
// =============================================================

#[test]
fn new_grid_has_empty_cells_and_default_maxima() {
    let g = grid();
    assert_eq!(g.question_count(), 3);
    assert_eq!(g.max_marks, vec![DEFAULT_QUESTION_MAX; 3]);
    assert_eq!(g.rows[1].scores, vec![None, None, None]);
    assert_eq!(g.max_total(), 30.0);
}

#[test]
fn question_count_is_clamped() {
    assert_eq!(MarksGrid::new(&students(), 0).question_count(), 1);
    assert_eq!(MarksGrid::new(&students(), 500).question_count(), MAX_QUESTIONS);
}

#[test]
fn growing_questions_copies_last_max_and_keeps_scores() {
    let mut g = grid();
    g.set_max(2, "4").unwrap();
    g.set_score(0, 0, "7").unwrap();
    g.set_question_count(5);
    assert_eq!(g.max_marks, vec![10.0, 10.0, 4.0, 4.0, 4.0]);
    assert_eq!(g.rows[0].scores[0], Some(7.0));
    assert_eq!(g.rows[0].scores.len(), 5);

    g.set_question_count(1);
    assert_eq!(g.rows[0].scores, vec![Some(7.0)]);
}

// =============================================================
// Scores
// =============================================================

#[test]
fn set_score_accepts_values_within_bounds() {
    let mut g = grid();
    g.set_score(0, 0, "0").unwrap();
    g.set_score(0, 1, " 10 ").unwrap();
    g.set_score(0, 2, "2.5").unwrap();
    assert_eq!(g.rows[0].total(), 12.5);
}

#[test]
fn set_score_rejects_out_of_bounds_and_garbage() {
    let mut g = grid();
    assert_eq!(g.set_score(0, 0, "11"), Err(GridError::AboveMax { max: 10.0 }));
    assert_eq!(g.set_score(0, 0, "-1"), Err(GridError::Negative));
    assert_eq!(g.set_score(0, 0, "ten"), Err(GridError::NotANumber));
    assert_eq!(g.set_score(0, 0, "NaN"), Err(GridError::NotANumber));
    assert_eq!(g.set_score(5, 0, "1"), Err(GridError::OutOfRange));
    assert_eq!(g.set_score(0, 9, "1"), Err(GridError::OutOfRange));
    assert_eq!(g.rows[0].scores[0], None);
}

#[test]
fn blank_input_clears_a_cell() {
    let mut g = grid();
    g.set_score(1, 1, "6").unwrap();
    g.set_score(1, 1, "  ").unwrap();
    assert_eq!(g.rows[1].scores[1], None);
}

#[test]
fn lowering_max_clears_scores_above_it() {
    let mut g = grid();
    g.set_score(0, 0, "9").unwrap();
    g.set_score(1, 0, "3").unwrap();
    g.set_max(0, "5").unwrap();
    assert_eq!(g.rows[0].scores[0], None);
    assert_eq!(g.rows[1].scores[0], Some(3.0));
}

#[test]
fn set_max_rejects_non_positive() {
    let mut g = grid();
    assert_eq!(g.set_max(0, "0"), Err(GridError::InvalidMax));
    assert_eq!(g.set_max(0, "abc"), Err(GridError::NotANumber));
    assert_eq!(g.set_max(7, "5"), Err(GridError::OutOfRange));
}

#[test]
fn grid_error_messages_are_user_facing() {
    assert_eq!(GridError::AboveMax { max: 5.0 }.to_string(), "Marks cannot exceed 5");
}

// =============================================================
// Prefill / submission
// =============================================================

#[test]
fn prefill_matches_students_with_same_question_count() {
    let mut g = grid();
    g.prefill(&[
        MarkRecord { student_id: "s2".to_owned(), scores: vec![1.0, 2.0, 3.0], ..MarkRecord::default() },
        MarkRecord { student_id: "s1".to_owned(), scores: vec![1.0], ..MarkRecord::default() },
    ]);
    assert_eq!(g.rows[1].scores, vec![Some(1.0), Some(2.0), Some(3.0)]);
    assert_eq!(g.rows[0].scores, vec![None, None, None]);
    assert_eq!(g.incomplete_rows(), 1);
}

#[test]
fn submission_requires_subject_exam_and_a_score() {
    let mut g = grid();
    assert_eq!(g.submission(), Err("Enter at least one score."));
    g.exam = " ".to_owned();
    assert_eq!(g.submission(), Err("Enter a subject and exam name."));
    assert_eq!(MarksGrid::default().submission(), Err("Enter a subject and exam name."));
}

#[test]
fn submission_carries_scores_and_totals() {
    let mut g = grid();
    g.set_score(0, 0, "4").unwrap();
    g.set_score(0, 2, "6").unwrap();
    let body = g.submission().unwrap();
    assert_eq!(body.subject, "Maths");
    assert_eq!(body.max_marks, vec![10.0, 10.0, 10.0]);
    assert_eq!(body.entries[0], MarksEntry { student_id: "s1".to_owned(), scores: vec![Some(4.0), None, Some(6.0)], total: 10.0 });
    assert_eq!(body.entries[1].total, 0.0);
}
