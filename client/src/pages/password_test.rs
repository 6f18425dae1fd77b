use futures::executor::block_on;

use super::*;
use crate::net::auth::PASSWORD_CHANGE;
use crate::net::request::RequestBody;
use crate::net::request::testing::RecordingTransport;

#[test]
fn new_password_rules() {
    assert_eq!(validate_new_password("abc", "abc"), Err("Password must be at least 6 characters."));
    assert_eq!(validate_new_password("secret1", "secret2"), Err("Passwords do not match."));
    assert_eq!(validate_new_password("secret1", "secret1"), Ok(()));
}

#[test]
fn email_rules() {
    assert_eq!(validate_email("  "), Err("Enter your email."));
    assert_eq!(validate_email("nobody"), Err("Enter a valid email address."));
    assert_eq!(validate_email(" t@school.edu "), Ok("t@school.edu".to_owned()));
}

#[test]
fn mismatched_confirmation_sends_nothing() {
    let transport = RecordingTransport::new();

    let result = block_on(submit_reset(&transport, "reset-tok", "secret1", "secret9"));

    assert_eq!(result, Err("Passwords do not match.".to_owned()));
    assert!(transport.requests().is_empty());
}

#[test]
fn blank_reset_token_sends_nothing() {
    let transport = RecordingTransport::new();
    let result = block_on(submit_reset(&transport, " ", "secret1", "secret1"));
    assert_eq!(result, Err("This reset link is invalid.".to_owned()));
    assert!(transport.requests().is_empty());
}

#[test]
fn matching_passwords_post_token_and_new_password() {
    let transport = RecordingTransport::new().reply_json(200, serde_json::json!({ "message": "Password changed" }));

    let result = block_on(submit_reset(&transport, "reset-tok", "secret1", "secret1"));

    assert_eq!(result, Ok("Password changed".to_owned()));
    let req = transport.only_request();
    assert_eq!(req.path, PASSWORD_CHANGE);
    assert_eq!(req.body, RequestBody::Json(serde_json::json!({ "token": "reset-tok", "newPassword": "secret1" })));
}

#[test]
fn expired_link_shows_backend_message() {
    let transport = RecordingTransport::new().reply_json(400, serde_json::json!({ "message": "Token expired" }));
    let result = block_on(submit_reset(&transport, "old", "secret1", "secret1"));
    assert_eq!(result, Err("Token expired".to_owned()));
}
