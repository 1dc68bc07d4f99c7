//! Rendering domain errors as HTTP responses.
//!
//! Every failure leaves the server as the JSON [`Error`] payload with a
//! status derived from its [`ErrorCode`]. Internal errors are logged in full
//! and sent to the client with a generic message.

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result type returned by page handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";

const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Payload safe to show the client.
fn public_view(err: &Error) -> Error {
    if err.code() != ErrorCode::InternalError {
        return err.clone();
    }
    error!(message = err.message(), trace_id = ?err.trace_id(), "internal error");
    let public = Error::internal(INTERNAL_MESSAGE);
    match err.trace_id() {
        Some(id) => public.with_trace_id(id.to_owned()),
        None => public,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        response.json(public_view(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "framework error surfaced in a handler");
        Self::internal(INTERNAL_MESSAGE)
    }
}

/// Turn an unreadable form body into a `400` in the usual error shape.
///
/// Registered through [`actix_web::web::JsonConfig::error_handler`] so that
/// malformed submissions never reach a handler.
///
/// # Examples
/// ```
/// use actix_web::web;
/// use noticeboard::inbound::http::error::json_error_handler;
///
/// let _config = web::JsonConfig::default().error_handler(json_error_handler);
/// ```
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = req.path(), error = %err, "rejected form body");
    let code = match &err {
        JsonPayloadError::ContentType => "unsupported_content_type",
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "body_too_large"
        }
        _ => "malformed_body",
    };
    Error::invalid_request("form body could not be read")
        .with_details(json!({ "code": code, "message": err.to_string() }))
        .into()
}

#[cfg(test)]
mod tests;
