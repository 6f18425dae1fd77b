use futures::executor::block_on;

use super::*;
use crate::net::request::Method;
use crate::net::request::testing::RecordingTransport;
use crate::state::session::Role;

fn admin() -> Session {
    Session { token: "AT".to_owned(), role: Role::Admin, user_id: "a1".to_owned(), display_name: "Admin".to_owned() }
}

#[test]
fn admin_name_reflects_response_field() {
    let transport = RecordingTransport::new().reply_json(200, serde_json::json!({ "adminName": "Dana Iyer" }));
    let name = block_on(fetch_admin_name(&transport, &admin())).unwrap();
    assert_eq!(name, "Dana Iyer");

    let req = transport.only_request();
    assert_eq!(req.path, ADMIN_NAME);
    assert_eq!(req.authorization_header().as_deref(), Some("Bearer AT"));
}

#[test]
fn admin_name_falls_back_when_absent_or_blank() {
    let transport = RecordingTransport::new()
        .reply_json(200, serde_json::json!({}))
        .reply_json(200, serde_json::json!({ "adminName": "   " }));
    assert_eq!(block_on(fetch_admin_name(&transport, &admin())).unwrap(), DEFAULT_ADMIN_NAME);
    assert_eq!(block_on(fetch_admin_name(&transport, &admin())).unwrap(), "Admin");
}

#[test]
fn marks_overview_accepts_wrapped_list() {
    let transport = RecordingTransport::new().reply_json(
        200,
        serde_json::json!({ "marks": [{ "_id": "m1", "studentName": "Ravi", "subject": "Maths", "total": 42.0 }] }),
    );
    let marks = block_on(fetch_marks_overview(&transport, &admin())).unwrap();
    assert_eq!(marks.len(), 1);
    assert_eq!(marks[0].student_name, "Ravi");
}

#[test]
fn remove_teacher_encodes_id_in_path() {
    let transport = RecordingTransport::new().reply_json(200, serde_json::json!({}));
    block_on(remove_teacher(&transport, &admin(), "t/1")).unwrap();
    let req = transport.only_request();
    assert_eq!(req.method, Method::Delete);
    assert_eq!(req.path, "/api/admin/teacher/t%2F1");
}
