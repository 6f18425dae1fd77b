use futures::executor::block_on;

use super::*;
use crate::net::request::testing::RecordingTransport;
use crate::net::oauth::AUTH_FAILED;
use crate::state::session::{MemoryStore, TOKEN_KEY};

#[test]
fn validate_login_input_trims_email() {
    let creds = validate_login_input("  t@school.edu ", "pw123456").unwrap();
    assert_eq!(creds.email, "t@school.edu");
    assert_eq!(creds.password, "pw123456");
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("", "pw").unwrap_err(), "Enter your email and password.");
    assert_eq!(validate_login_input("t@school.edu", "").unwrap_err(), "Enter your email and password.");
    assert_eq!(validate_login_input("teacher", "pw").unwrap_err(), "Enter a valid email address.");
}

#[test]
fn backend_rejection_is_shown_verbatim_and_nothing_is_stored() {
    for role in Role::ALL {
        let transport =
            RecordingTransport::new().reply_json(401, serde_json::json!({ "message": "Invalid email or password" }));
        let store = MemoryStore::new();
        let creds = validate_login_input("a@school.edu", "wrong").unwrap();

        let err = block_on(submit_login(&transport, &store, role, &creds)).unwrap_err();

        assert_eq!(err.user_message(LOGIN_FAILED), "Invalid email or password");
        assert!(store.is_empty());
    }
}

#[test]
fn transport_failure_falls_back_to_generic_message() {
    let transport = RecordingTransport::new().reply_err(ApiError::Transport("offline".to_owned()));
    let store = MemoryStore::new();
    let creds = validate_login_input("a@school.edu", "pw").unwrap();

    let err = block_on(submit_login(&transport, &store, Role::Admin, &creds)).unwrap_err();

    assert_eq!(err.user_message(LOGIN_FAILED), LOGIN_FAILED);
}

#[test]
fn teacher_login_routes_to_teacher_endpoint() {
    let transport = RecordingTransport::new()
        .reply_json(200, serde_json::json!({ "token": "T", "teacher": { "_id": "t1", "name": "Asha" } }));
    let store = MemoryStore::new();
    let creds = validate_login_input("a@school.edu", "pw").unwrap();

    let session = block_on(submit_login(&transport, &store, Role::Teacher, &creds)).unwrap();

    assert_eq!(transport.only_request().path, auth::TEACHER_LOGIN);
    assert_eq!(session.user_id, "t1");
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("T"));
}

#[test]
fn failed_handoff_stays_on_the_form_with_the_auth_message() {
    let transport = RecordingTransport::new().reply_json(200, serde_json::json!({ "name": "Dana" }));
    let store = MemoryStore::new();

    let result = block_on(resume_handoff(&transport, &store, parse_handoff(Some("T"), Some("admin"), None)));

    assert_eq!(result, Err(AUTH_FAILED));
    assert!(store.is_empty());
}

#[test]
fn successful_handoff_returns_the_session_to_adopt() {
    let transport = RecordingTransport::new().reply_json(200, serde_json::json!({ "_id": "a1", "name": "Dana" }));
    let store = MemoryStore::new();

    let session = block_on(resume_handoff(&transport, &store, parse_handoff(Some("T"), Some("admin"), None)))
        .unwrap()
        .unwrap();

    assert_eq!(session.role.dashboard_path(), "/admindash");
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("T"));
}

#[test]
fn plain_login_url_sends_nothing() {
    let transport = RecordingTransport::new();
    let store = MemoryStore::new();

    assert_eq!(block_on(resume_handoff(&transport, &store, parse_handoff(None, None, None))), Ok(None));
    assert!(transport.requests().is_empty());
}
