//! Public contact form, forwarded by the backend to a spreadsheet.

use super::request::{ApiError, ApiRequest, Transport, send_json};
use super::types::{ContactMessage, MessageResponse};

pub const CONTACT_US: &str = "/api/Gsheet/contactus";

/// `POST /api/Gsheet/contactus`. No session required.
///
/// # Errors
///
/// Propagates request failures.
pub async fn send_contact<X: Transport + ?Sized>(transport: &X, message: &ContactMessage) -> Result<Option<String>, ApiError> {
    let resp: Option<MessageResponse> = send_json(transport, ApiRequest::post(CONTACT_US).json(message)?).await?;
    Ok(resp.and_then(|r| r.message))
}
