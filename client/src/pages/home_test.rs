use futures::executor::block_on;

use super::*;
use crate::net::contact::CONTACT_US;
use crate::net::request::testing::RecordingTransport;

#[test]
fn contact_requires_every_field() {
    assert_eq!(validate_contact("", "a@b.co", "hi").unwrap_err(), "Please fill in every field.");
    assert_eq!(validate_contact("Ann", "a@b.co", "   ").unwrap_err(), "Please fill in every field.");
    assert_eq!(validate_contact("Ann", "ann", "hi").unwrap_err(), "Enter a valid email address.");
}

#[test]
fn contact_body_is_trimmed_and_posted_without_auth() {
    let body = validate_contact(" Ann ", " ann@b.co ", " Hello ").unwrap();
    assert_eq!(body, ContactMessage { name: "Ann".to_owned(), email: "ann@b.co".to_owned(), message: "Hello".to_owned() });

    let transport = RecordingTransport::new().reply_json(200, serde_json::json!({ "message": "Saved" }));
    let reply = block_on(send_contact(&transport, &body)).unwrap();
    assert_eq!(reply.as_deref(), Some("Saved"));

    let req = transport.only_request();
    assert_eq!(req.path, CONTACT_US);
    assert_eq!(req.authorization_header(), None);
}
