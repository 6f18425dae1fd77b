//! Quiz authoring draft (teacher) and quiz attempt (student).

#[cfg(test)]
#[path = "quiz_test.rs"]
mod quiz_test;

use crate::net::types::{Question, Quiz, QuizAnswers, QuizInput};

pub const MIN_OPTIONS: usize = 2;
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// One editable question. `key` is a stable client-side identity for list rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionDraft {
    pub key: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct: Option<usize>,
    pub marks: f64,
}

impl QuestionDraft {
    pub fn blank() -> Self {
        Self {
            key: uuid::Uuid::new_v4().to_string(),
            text: String::new(),
            options: vec![String::new(); MIN_OPTIONS],
            correct: None,
            marks: 1.0,
        }
    }

    fn from_question(q: &Question) -> Self {
        Self {
            key: uuid::Uuid::new_v4().to_string(),
            text: q.text.clone(),
            options: q.options.clone(),
            correct: q.correct_option.filter(|i| *i < q.options.len()),
            marks: if q.marks > 0.0 { q.marks } else { 1.0 },
        }
    }

    pub fn remove_option(&mut self, index: usize) {
        if index >= self.options.len() || self.options.len() <= MIN_OPTIONS {
            return;
        }
        self.options.remove(index);
        self.correct = match self.correct {
            Some(c) if c == index => None,
            Some(c) if c > index => Some(c - 1),
            other => other,
        };
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuizDraft {
    /// Set when editing an existing quiz.
    pub editing_id: Option<String>,
    pub title: String,
    pub subject: String,
    pub duration_minutes: u32,
    pub questions: Vec<QuestionDraft>,
}

impl Default for QuizDraft {
    fn default() -> Self {
        Self {
            editing_id: None,
            title: String::new(),
            subject: String::new(),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            questions: vec![QuestionDraft::blank()],
        }
    }
}

impl QuizDraft {
    pub fn from_quiz(quiz: &Quiz) -> Self {
        let mut questions: Vec<_> = quiz.questions.iter().map(QuestionDraft::from_question).collect();
        if questions.is_empty() {
            questions.push(QuestionDraft::blank());
        }
        Self {
            editing_id: Some(quiz.id.clone()),
            title: quiz.title.clone(),
            subject: quiz.subject.clone(),
            duration_minutes: if quiz.duration_minutes == 0 { DEFAULT_DURATION_MINUTES } else { quiz.duration_minutes },
            questions,
        }
    }

    pub fn question_mut(&mut self, key: &str) -> Option<&mut QuestionDraft> {
        self.questions.iter_mut().find(|q| q.key == key)
    }

    pub fn add_question(&mut self) {
        self.questions.push(QuestionDraft::blank());
    }

    /// Remove a question, always leaving at least one.
    pub fn remove_question(&mut self, key: &str) {
        if self.questions.len() > 1 {
            self.questions.retain(|q| q.key != key);
        }
    }

    pub fn total_marks(&self) -> f64 {
        self.questions.iter().map(|q| q.marks).sum()
    }

    /// Validate and build the request body.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, phrased for display.
    pub fn to_input(&self) -> Result<QuizInput, String> {
        if self.title.trim().is_empty() {
            return Err("Enter a title.".to_owned());
        }
        if self.duration_minutes == 0 {
            return Err("Duration must be at least one minute.".to_owned());
        }
        let mut questions = Vec::with_capacity(self.questions.len());
        for (n, q) in self.questions.iter().enumerate() {
            let n = n + 1;
            if q.text.trim().is_empty() {
                return Err(format!("Question {n} has no text."));
            }
            let options: Vec<String> = q.options.iter().map(|o| o.trim().to_owned()).collect();
            if options.len() < MIN_OPTIONS || options.iter().any(String::is_empty) {
                return Err(format!("Question {n} needs at least {MIN_OPTIONS} filled options."));
            }
            let Some(correct) = q.correct.filter(|c| *c < options.len()) else {
                return Err(format!("Question {n} has no correct option."));
            };
            if !q.marks.is_finite() || q.marks <= 0.0 {
                return Err(format!("Question {n} must be worth more than zero marks."));
            }
            questions.push(Question { text: q.text.trim().to_owned(), options, correct_option: Some(correct), marks: q.marks });
        }
        Ok(QuizInput {
            title: self.title.trim().to_owned(),
            subject: self.subject.trim().to_owned(),
            duration_minutes: self.duration_minutes,
            questions,
        })
    }
}

/// A student's in-progress answers for one quiz.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizAttempt {
    pub quiz: Quiz,
    pub answers: Vec<Option<usize>>,
}

impl QuizAttempt {
    pub fn start(quiz: Quiz) -> Self {
        let answers = vec![None; quiz.questions.len()];
        Self { quiz, answers }
    }

    pub fn answer(&mut self, question: usize, option: usize) {
        let valid = self.quiz.questions.get(question).is_some_and(|q| option < q.options.len());
        if valid {
            self.answers[question] = Some(option);
        }
    }

    pub fn unanswered(&self) -> usize {
        self.answers.iter().filter(|a| a.is_none()).count()
    }

    pub fn to_answers(&self) -> QuizAnswers {
        QuizAnswers { answers: self.answers.clone() }
    }
}
