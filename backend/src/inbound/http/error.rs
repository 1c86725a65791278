//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and
//! status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TRACE_ID_HEADER;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(err: &Error) -> Error {
    if matches!(err.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = err.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        err.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    //! Tests for the error response mapping.

    use actix_web::body::to_bytes;
    use serde_json::{Value, json};

    use super::*;

    async fn response_body(err: &Error) -> Value {
        let response = err.error_response();
        let bytes = to_bytes(response.into_body())
            .await
            .expect("reading response body succeeds");
        serde_json::from_slice(&bytes).expect("error payload is JSON")
    }

    #[test]
    fn status_codes_match_error_codes() {
        let cases = [
            (Error::invalid_request("bad"), StatusCode::BAD_REQUEST),
            (Error::not_found("missing"), StatusCode::NOT_FOUND),
            (Error::conflict("duplicate"), StatusCode::CONFLICT),
            (
                Error::service_unavailable("pool drained"),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status);
        }
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted() {
        let err = Error::internal("connection string leaked")
            .with_details(json!({ "secret": "x" }));
        let body = response_body(&err).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("Internal server error")
        );
        assert!(body.get("details").is_none());
    }

    #[actix_web::test]
    async fn client_errors_keep_message_and_details() {
        let err = Error::conflict("duplicate vote").with_details(json!({ "field": "productId" }));
        let body = response_body(&err).await;
        assert_eq!(
            body.get("message").and_then(Value::as_str),
            Some("duplicate vote")
        );
        assert!(body.get("details").is_some());
    }

    #[actix_web::test]
    async fn trace_id_is_echoed_as_header() {
        let err = Error::not_found("missing").with_trace_id("abc");
        let response = err.error_response();
        let header = response
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("ascii header");
        assert_eq!(header, "abc");
    }
}
