//! Error types for the snake server.
//!
//! [`SnakeError`] covers every failure the library reports. Only
//! `MalformedRequest` reaches an HTTP client; `NoLegalMove` is resolved by the
//! selector into a least-bad move before a response is built.

use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use serde_json::json;
use std::io::Cursor;

#[derive(Debug, thiserror::Error)]
pub enum SnakeError {
    /// The request is missing a field the selector depends on.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// Every direction from the head is off-board or occupied.
    #[error("no legal move available from {0:?}")]
    NoLegalMove(crate::types::Coord),

    /// Snake.toml could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// A debug log could not be read or parsed.
    #[error("log error: {0}")]
    Log(String),
}

impl SnakeError {
    pub fn status(&self) -> Status {
        match self {
            SnakeError::MalformedRequest(_) => Status::BadRequest,
            _ => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for SnakeError {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        let body = json!({
            "error": self.to_string(),
            "status": status.code,
        })
        .to_string();

        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(body.len(), Cursor::new(body))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_request_is_client_error() {
        let err = SnakeError::MalformedRequest("you.body is empty".to_string());
        assert_eq!(err.status(), Status::BadRequest);
        assert_eq!(err.to_string(), "malformed request: you.body is empty");
    }

    #[test]
    fn test_other_errors_are_server_errors() {
        let err = SnakeError::Config("missing".to_string());
        assert_eq!(err.status(), Status::InternalServerError);
    }
}
