//! HTTP mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! turn domain failures into consistent JSON responses and status codes.
//! Absence never reaches this module as an error; handlers convert `None`
//! into a not-found error themselves.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        // Unknown lookup fields surface as 404 like missing records; the
        // payload still carries the distinct invalid_field code.
        ErrorCode::NotFound | ErrorCode::InvalidField => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        Error::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}
