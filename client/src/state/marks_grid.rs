//! Marks-entry grid: one row per student, one column per question.
//!
//! DESIGN
//! ======
//! The grid only enforces what a teacher could get wrong while typing
//! (non-numeric input, negative scores, scores above the question maximum).
//! Grading rules, rounding and moderation belong to the backend, which
//! receives the raw per-question scores plus the row totals shown on screen.

#[cfg(test)]
#[path = "marks_grid_test.rs"]
mod marks_grid_test;

use crate::net::types::{MarkRecord, MarksEntry, MarksSubmission, Student};

pub const DEFAULT_QUESTION_MAX: f64 = 10.0;
pub const MAX_QUESTIONS: usize = 50;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("Enter a number")]
    NotANumber,
    #[error("Marks cannot be negative")]
    Negative,
    #[error("Marks cannot exceed {max}")]
    AboveMax { max: f64 },
    #[error("Maximum marks must be greater than zero")]
    InvalidMax,
    #[error("No such cell")]
    OutOfRange,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridRow {
    pub student_id: String,
    pub name: String,
    pub roll_no: String,
    pub scores: Vec<Option<f64>>,
}

impl GridRow {
    pub fn total(&self) -> f64 {
        self.scores.iter().flatten().sum()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarksGrid {
    pub subject: String,
    pub exam: String,
    pub max_marks: Vec<f64>,
    pub rows: Vec<GridRow>,
}

impl MarksGrid {
    pub fn new(students: &[Student], question_count: usize) -> Self {
        let question_count = question_count.clamp(1, MAX_QUESTIONS);
        let rows = students
            .iter()
            .map(|s| GridRow {
                student_id: s.id.clone(),
                name: s.name.clone(),
                roll_no: s.roll_no.clone(),
                scores: vec![None; question_count],
            })
            .collect();
        Self { subject: String::new(), exam: String::new(), max_marks: vec![DEFAULT_QUESTION_MAX; question_count], rows }
    }

    pub fn question_count(&self) -> usize {
        self.max_marks.len()
    }

    /// Grow or shrink the question columns. New columns copy the last maximum.
    pub fn set_question_count(&mut self, count: usize) {
        let count = count.clamp(1, MAX_QUESTIONS);
        let fill = self.max_marks.last().copied().unwrap_or(DEFAULT_QUESTION_MAX);
        self.max_marks.resize(count, fill);
        for row in &mut self.rows {
            row.scores.resize(count, None);
        }
    }

    /// Set a question maximum, clearing scores that no longer fit under it.
    ///
    /// # Errors
    ///
    /// Rejects non-numeric or non-positive maxima and unknown columns.
    pub fn set_max(&mut self, question: usize, raw: &str) -> Result<(), GridError> {
        let max = raw.trim().parse::<f64>().map_err(|_| GridError::NotANumber)?;
        if !max.is_finite() || max <= 0.0 {
            return Err(GridError::InvalidMax);
        }
        let slot = self.max_marks.get_mut(question).ok_or(GridError::OutOfRange)?;
        *slot = max;
        for row in &mut self.rows {
            if let Some(score) = row.scores.get_mut(question) {
                if score.is_some_and(|s| s > max) {
                    *score = None;
                }
            }
        }
        Ok(())
    }

    /// Set one score from text input. Blank input clears the cell.
    ///
    /// # Errors
    ///
    /// Rejects non-numeric, negative or above-maximum scores and unknown cells.
    pub fn set_score(&mut self, row: usize, question: usize, raw: &str) -> Result<(), GridError> {
        let max = *self.max_marks.get(question).ok_or(GridError::OutOfRange)?;
        let cell = self
            .rows
            .get_mut(row)
            .and_then(|r| r.scores.get_mut(question))
            .ok_or(GridError::OutOfRange)?;
        let raw = raw.trim();
        if raw.is_empty() {
            *cell = None;
            return Ok(());
        }
        let score = raw.parse::<f64>().map_err(|_| GridError::NotANumber)?;
        if !score.is_finite() {
            return Err(GridError::NotANumber);
        }
        if score < 0.0 {
            return Err(GridError::Negative);
        }
        if score > max {
            return Err(GridError::AboveMax { max });
        }
        *cell = Some(score);
        Ok(())
    }

    pub fn max_total(&self) -> f64 {
        self.max_marks.iter().sum()
    }

    /// Number of rows with at least one empty cell.
    pub fn incomplete_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.scores.iter().any(Option::is_none)).count()
    }

    /// Load previously submitted scores for matching students.
    ///
    /// Records whose score count differs from the grid are skipped.
    pub fn prefill(&mut self, records: &[MarkRecord]) {
        for record in records {
            if record.scores.len() != self.question_count() {
                continue;
            }
            if let Some(row) = self.rows.iter_mut().find(|r| r.student_id == record.student_id) {
                row.scores = record.scores.iter().copied().map(Some).collect();
            }
        }
    }

    /// Build the submission body.
    ///
    /// # Errors
    ///
    /// Returns a display message when subject, exam or students are missing.
    pub fn submission(&self) -> Result<MarksSubmission, &'static str> {
        if self.subject.trim().is_empty() || self.exam.trim().is_empty() {
            return Err("Enter a subject and exam name.");
        }
        if self.rows.is_empty() {
            return Err("No students to grade.");
        }
        if self.rows.iter().all(|r| r.scores.iter().all(Option::is_none)) {
            return Err("Enter at least one score.");
        }
        Ok(MarksSubmission {
            subject: self.subject.trim().to_owned(),
            exam: self.exam.trim().to_owned(),
            max_marks: self.max_marks.clone(),
            entries: self
                .rows
                .iter()
                .map(|r| MarksEntry { student_id: r.student_id.clone(), scores: r.scores.clone(), total: r.total() })
                .collect(),
        })
    }
}
