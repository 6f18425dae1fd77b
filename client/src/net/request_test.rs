use super::testing::RecordingTransport;
use super::*;
use crate::state::session::Role;

fn raw(status: u16, body: &str) -> RawResponse {
    RawResponse { status, content_type: Some("application/json".to_owned()), body: body.as_bytes().to_vec() }
}

// =============================================================
// ApiRequest builders
// =============================================================

#[test]
fn bearer_sets_authorization_header() {
    let req = ApiRequest::get("/api/admin/fetchmarks").bearer("abc");
    assert_eq!(req.authorization_header().as_deref(), Some("Bearer abc"));
}

#[test]
fn authorized_uses_session_token() {
    let session = Session {
        token: "T".to_owned(),
        role: Role::Admin,
        user_id: "a1".to_owned(),
        display_name: "Root".to_owned(),
    };
    let req = ApiRequest::get("/x").authorized(&session);
    assert_eq!(req.authorization_header().as_deref(), Some("Bearer T"));
}

#[test]
fn anonymous_request_has_no_authorization_header() {
    assert_eq!(ApiRequest::post("/api/admin/adminlogin").authorization_header(), None);
}

#[test]
fn url_encodes_query_and_skips_blank_values() {
    let req = ApiRequest::get("/api/teachermarks/marks")
        .query("subject", "Maths & Stats")
        .query("exam", "  ")
        .query("term", "T1");
    assert_eq!(req.url(), "/api/teachermarks/marks?subject=Maths%20%26%20Stats&term=T1");
}

#[test]
fn url_without_query_is_plain_path() {
    assert_eq!(ApiRequest::delete("/api/schedules/9").url(), "/api/schedules/9");
}

#[test]
fn json_body_is_serialized_value() {
    let req = ApiRequest::post("/p").json(&serde_json::json!({ "email": "a@b.c" })).unwrap();
    assert_eq!(req.body, RequestBody::Json(serde_json::json!({ "email": "a@b.c" })));
    assert_eq!(req.method, Method::Post);
}

#[test]
fn method_names_are_uppercase_http_verbs() {
    let names: Vec<_> = [Method::Get, Method::Post, Method::Put, Method::Patch, Method::Delete]
        .into_iter()
        .map(Method::as_str)
        .collect();
    assert_eq!(names, ["GET", "POST", "PUT", "PATCH", "DELETE"]);
}

// =============================================================
// Response interpretation
// =============================================================

#[test]
fn extract_message_prefers_message_then_error() {
    assert_eq!(extract_message(br#"{"message":"Invalid email or password"}"#).as_deref(), Some("Invalid email or password"));
    assert_eq!(extract_message(br#"{"error":"Token expired"}"#).as_deref(), Some("Token expired"));
    assert_eq!(extract_message(br#"{"message":"  ","error":"fallback"}"#).as_deref(), Some("fallback"));
    assert_eq!(extract_message(br#"{"status":"nope"}"#), None);
    assert_eq!(extract_message(b"<html>502</html>"), None);
}

#[test]
fn interpret_decodes_success_body() {
    let value: serde_json::Value = interpret(raw(200, r#"{"adminName":"Dana"}"#)).unwrap();
    assert_eq!(value["adminName"], "Dana");
}

#[test]
fn interpret_treats_empty_success_body_as_null() {
    let value: Option<serde_json::Value> = interpret(raw(204, "")).unwrap();
    assert_eq!(value, None);
}

#[test]
fn interpret_maps_error_status_with_message() {
    let err = interpret::<serde_json::Value>(raw(401, r#"{"message":"Invalid email or password"}"#)).unwrap_err();
    assert_eq!(err, ApiError::Backend { status: 401, message: Some("Invalid email or password".to_owned()) });
    assert_eq!(err.user_message(GENERIC_FAILURE), "Invalid email or password");
}

#[test]
fn interpret_uses_fallback_when_body_has_no_message() {
    let err = interpret::<serde_json::Value>(raw(500, "Internal Server Error")).unwrap_err();
    assert_eq!(err.server_message(), None);
    assert_eq!(err.user_message("Failed to fetch students"), "Failed to fetch students");
}

#[test]
fn interpret_reports_decode_failures() {
    #[derive(Debug, serde::Deserialize)]
    struct Needs {
        #[allow(dead_code)]
        token: String,
    }
    let err = interpret::<Needs>(raw(200, r#"{"other":1}"#)).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(err.user_message(GENERIC_FAILURE), GENERIC_FAILURE);
}

#[test]
fn transport_errors_never_expose_internal_text_to_users() {
    let err = ApiError::Transport("TypeError: Failed to fetch".to_owned());
    assert_eq!(err.user_message("Failed to fetch marks"), "Failed to fetch marks");
}

// =============================================================
// Send helpers
// =============================================================

#[test]
fn send_bytes_returns_body_on_success() {
    let transport = RecordingTransport::new().reply_bytes(200, "application/pdf", b"%PDF-1.4");
    let bytes = futures::executor::block_on(send_bytes(&transport, ApiRequest::get("/r"))).unwrap();
    assert_eq!(bytes, b"%PDF-1.4");
}

#[test]
fn send_empty_propagates_backend_error() {
    let transport = RecordingTransport::new().reply_json(404, serde_json::json!({ "message": "Student not found" }));
    let err = futures::executor::block_on(send_empty(&transport, ApiRequest::delete("/s/1"))).unwrap_err();
    assert_eq!(err.server_message(), Some("Student not found"));
}

#[test]
fn gloo_transport_is_unavailable_off_browser() {
    let err = futures::executor::block_on(GlooTransport.send(ApiRequest::get("/x"))).unwrap_err();
    assert_eq!(err, ApiError::Unavailable);
}

#[test]
fn storage_failure_has_its_own_message() {
    let err = ApiError::from(crate::state::session::StoreError::Unavailable);
    assert_eq!(err.user_message("Login failed"), STORAGE_FAILURE);
}
