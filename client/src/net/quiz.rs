//! Quiz authoring, publishing and taking (`/api/teacher/*test*`, `/api/student/*test*`).

#[cfg(test)]
#[path = "quiz_test.rs"]
mod quiz_test;

use super::request::{ApiError, ApiRequest, Transport, send_empty, send_json};
use super::types::{MessageResponse, Quiz, QuizAnswers, QuizInput, QuizResult, unwrap_list};
use crate::state::session::Session;

pub const TEACHER_TESTS: &str = "/api/teacher/tests";
pub const CREATE_TEST: &str = "/api/teacher/create-test";
pub const STUDENT_TESTS: &str = "/api/student/tests";

fn id_endpoint(prefix: &str, id: &str) -> String {
    format!("{prefix}/{}", urlencoding::encode(id))
}

/// # Errors
///
/// Propagates request failures.
pub async fn list_quizzes<X: Transport + ?Sized>(transport: &X, session: &Session) -> Result<Vec<Quiz>, ApiError> {
    let value: serde_json::Value = send_json(transport, ApiRequest::get(TEACHER_TESTS).authorized(session)).await?;
    Ok(unwrap_list(value, "tests"))
}

/// # Errors
///
/// Propagates request failures.
pub async fn create_quiz<X: Transport + ?Sized>(transport: &X, session: &Session, input: &QuizInput) -> Result<(), ApiError> {
    send_empty(transport, ApiRequest::post(CREATE_TEST).authorized(session).json(input)?).await
}

/// # Errors
///
/// Propagates request failures.
pub async fn update_quiz<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
    id: &str,
    input: &QuizInput,
) -> Result<(), ApiError> {
    let request = ApiRequest::put(id_endpoint("/api/teacher/update-test", id)).authorized(session).json(input)?;
    send_empty(transport, request).await
}

/// # Errors
///
/// Propagates request failures.
pub async fn delete_quiz<X: Transport + ?Sized>(transport: &X, session: &Session, id: &str) -> Result<(), ApiError> {
    send_empty(transport, ApiRequest::delete(id_endpoint("/api/teacher/delete-test", id)).authorized(session)).await
}

/// Make a quiz visible to students.
///
/// # Errors
///
/// Propagates request failures.
pub async fn publish_quiz<X: Transport + ?Sized>(transport: &X, session: &Session, id: &str) -> Result<(), ApiError> {
    let request = ApiRequest::patch(id_endpoint("/api/teacher/publish-test", id))
        .authorized(session)
        .json(&serde_json::json!({ "published": true }))?;
    send_empty(transport, request).await
}

/// # Errors
///
/// Propagates request failures.
pub async fn quiz_results<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
    id: &str,
) -> Result<Vec<QuizResult>, ApiError> {
    let request = ApiRequest::get(id_endpoint("/api/teacher/test-results", id)).authorized(session);
    let value: serde_json::Value = send_json(transport, request).await?;
    Ok(unwrap_list(value, "results"))
}

/// Published quizzes available to the signed-in student.
///
/// # Errors
///
/// Propagates request failures.
pub async fn available_quizzes<X: Transport + ?Sized>(transport: &X, session: &Session) -> Result<Vec<Quiz>, ApiError> {
    let value: serde_json::Value = send_json(transport, ApiRequest::get(STUDENT_TESTS).authorized(session)).await?;
    Ok(unwrap_list(value, "tests"))
}

/// # Errors
///
/// Propagates request failures.
pub async fn submit_answers<X: Transport + ?Sized>(
    transport: &X,
    session: &Session,
    id: &str,
    answers: &QuizAnswers,
) -> Result<Option<String>, ApiError> {
    let request = ApiRequest::post(id_endpoint("/api/student/submit-test", id)).authorized(session).json(answers)?;
    let resp: Option<MessageResponse> = send_json(transport, request).await?;
    Ok(resp.and_then(|r| r.message))
}

/// Results table rows for the teacher's results view.
pub fn results_table(results: &[QuizResult]) -> (Vec<String>, Vec<Vec<String>>) {
    let header = ["Student", "Score", "Out Of", "Submitted"].map(str::to_owned).to_vec();
    let rows = results
        .iter()
        .map(|r| {
            vec![
                r.student_name.clone(),
                super::marks::format_score(r.score),
                super::marks::format_score(r.total),
                r.submitted_at.clone(),
            ]
        })
        .collect();
    (header, rows)
}
