//! Backend DTOs for the Gradyze REST API.
//!
//! DESIGN
//! ======
//! The backend owns these schemas, so decoding is lenient: every field has a
//! default, `_id` is accepted alongside `id`, and unknown fields are ignored.
//! A renamed or missing field degrades one cell of a table instead of failing
//! the whole screen.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// AUTH
// =============================================================================

#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminLoginResponse {
    pub token: String,
    pub admin_id: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct AdminSignup {
    pub name: String,
    pub email: String,
    pub institution: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeacherSummary {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub admin_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TeacherLoginResponse {
    pub token: String,
    pub teacher: TeacherSummary,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TokenResponse {
    pub token: String,
}

/// Profile returned by `/api/auth/verify`.
///
/// Some deployments nest the profile under `user`; `Profile::flatten`
/// normalizes both shapes.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Option<String>,
    pub user: Option<Box<Profile>>,
}

impl Profile {
    pub fn flatten(self) -> Profile {
        match self.user {
            Some(inner) if self.id.is_empty() => inner.flatten(),
            _ => Profile { user: None, ..self },
        }
    }
}

// =============================================================================
// GENERIC
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MessageResponse {
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminNameResponse {
    pub admin_name: Option<String>,
}

// =============================================================================
// ROSTER
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Student {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub roll_no: String,
    pub email: String,
    pub class_name: String,
    pub section: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    pub name: String,
    pub roll_no: String,
    pub email: String,
    pub class_name: String,
    pub section: String,
}

impl From<&Student> for StudentInput {
    fn from(s: &Student) -> Self {
        Self {
            name: s.name.clone(),
            roll_no: s.roll_no.clone(),
            email: s.email.clone(),
            class_name: s.class_name.clone(),
            section: s.section.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Teacher {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TeacherInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub subject: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportSummary {
    pub inserted: u32,
    pub skipped: u32,
    pub message: Option<String>,
}

// =============================================================================
// MARKS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub roll_no: String,
    pub subject: String,
    pub exam: String,
    pub scores: Vec<f64>,
    pub total: f64,
    pub max_total: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarksEntry {
    pub student_id: String,
    pub scores: Vec<Option<f64>>,
    pub total: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarksSubmission {
    pub subject: String,
    pub exam: String,
    pub max_marks: Vec<f64>,
    pub entries: Vec<MarksEntry>,
}

// =============================================================================
// ATTENDANCE
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Schedule {
    #[serde(alias = "_id")]
    pub id: String,
    pub subject: String,
    pub class_name: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInput {
    pub subject: String,
    pub class_name: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn label(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            AttendanceStatus::Present => AttendanceStatus::Absent,
            AttendanceStatus::Absent => AttendanceStatus::Present,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttendanceRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub subject: String,
    pub date: String,
    pub status: AttendanceStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub student_id: String,
    pub status: AttendanceStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSubmission {
    pub schedule_id: String,
    pub date: String,
    pub entries: Vec<AttendanceEntry>,
}

// =============================================================================
// QUIZZES ("tests" in the backend's vocabulary)
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    /// Index into `options`. Absent in the student-facing listing.
    pub correct_option: Option<usize>,
    pub marks: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quiz {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub subject: String,
    pub duration_minutes: u32,
    pub published: bool,
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizInput {
    pub title: String,
    pub subject: String,
    pub duration_minutes: u32,
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizResult {
    pub student_id: String,
    pub student_name: String,
    pub score: f64,
    pub total: f64,
    pub submitted_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuizAnswers {
    pub answers: Vec<Option<usize>>,
}

// =============================================================================
// GOOGLE CLASSROOM
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassroomStatus {
    pub connected: bool,
    pub email: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConnectUrl {
    pub url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub section: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub max_points: Option<f64>,
    pub due_date: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SyncResult {
    pub synced: u32,
    pub message: Option<String>,
}

// =============================================================================
// CONTACT
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Decode a list that may arrive bare or wrapped as `{"<key>": [...]}`.
pub fn unwrap_list<T: serde::de::DeserializeOwned>(value: serde_json::Value, key: &str) -> Vec<T> {
    let list = match value {
        serde_json::Value::Array(_) => value,
        serde_json::Value::Object(mut map) => map.remove(key).unwrap_or(serde_json::Value::Null),
        _ => serde_json::Value::Null,
    };
    serde_json::from_value(list).unwrap_or_default()
}
