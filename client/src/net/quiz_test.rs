use futures::executor::block_on;

use super::*;
use crate::net::request::testing::RecordingTransport;
use crate::net::request::{Method, RequestBody};
use crate::state::session::Role;

fn session(role: Role) -> Session {
    Session { token: "Q".to_owned(), role, user_id: "u1".to_owned(), display_name: "U".to_owned() }
}

#[test]
fn publish_patches_publish_endpoint() {
    let transport = RecordingTransport::new().reply_json(200, serde_json::json!({}));
    block_on(publish_quiz(&transport, &session(Role::Teacher), "q1")).unwrap();

    let req = transport.only_request();
    assert_eq!(req.method, Method::Patch);
    assert_eq!(req.path, "/api/teacher/publish-test/q1");
    assert_eq!(req.body, RequestBody::Json(serde_json::json!({ "published": true })));
}

#[test]
fn update_and_delete_use_distinct_paths() {
    let transport = RecordingTransport::new()
        .reply_json(200, serde_json::json!({}))
        .reply_json(200, serde_json::json!({}));
    let input = QuizInput { title: "Quiz".to_owned(), subject: "Bio".to_owned(), duration_minutes: 10, questions: vec![] };
    block_on(update_quiz(&transport, &session(Role::Teacher), "q1", &input)).unwrap();
    block_on(delete_quiz(&transport, &session(Role::Teacher), "q1")).unwrap();

    let sent = transport.requests();
    assert_eq!((sent[0].method, sent[0].path.as_str()), (Method::Put, "/api/teacher/update-test/q1"));
    assert_eq!((sent[1].method, sent[1].path.as_str()), (Method::Delete, "/api/teacher/delete-test/q1"));
}

#[test]
fn submit_answers_returns_backend_message() {
    let transport = RecordingTransport::new().reply_json(200, serde_json::json!({ "message": "Scored 4/5" }));
    let answers = QuizAnswers { answers: vec![Some(1), None] };
    let msg = block_on(submit_answers(&transport, &session(Role::Student), "q7", &answers)).unwrap();

    assert_eq!(msg.as_deref(), Some("Scored 4/5"));
    let req = transport.only_request();
    assert_eq!(req.path, "/api/student/submit-test/q7");
    assert_eq!(req.body, RequestBody::Json(serde_json::json!({ "answers": [1, null] })));
}

#[test]
fn quiz_list_decodes_published_flag() {
    let transport = RecordingTransport::new().reply_json(
        200,
        serde_json::json!({ "tests": [{ "_id": "q1", "title": "Cells", "published": true, "durationMinutes": 15 }] }),
    );
    let quizzes = block_on(list_quizzes(&transport, &session(Role::Teacher))).unwrap();
    assert_eq!(quizzes[0].id, "q1");
    assert!(quizzes[0].published);
    assert_eq!(quizzes[0].duration_minutes, 15);
}

#[test]
fn results_table_formats_scores() {
    let results = [QuizResult { student_name: "Ravi".to_owned(), score: 4.0, total: 5.0, ..QuizResult::default() }];
    let (_, rows) = results_table(&results);
    assert_eq!(rows[0], ["Ravi", "4", "5", ""]);
}
