use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error as ThisError;

use crate::core::models::poll::PollStatus;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("poll not found: {0}")]
    PollNotFound(String),

    #[error("invalid option {option} for poll {poll}")]
    InvalidOption { poll: String, option: String },

    #[error("poll {0} is not accepting votes")]
    PollClosed(String),

    #[error("illegal status transition: {from:?} -> {to:?}")]
    IllegalTransition { from: PollStatus, to: PollStatus },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("server error: {0}")]
    ServerError(String),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::PollNotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidOption { .. } | Error::PollClosed(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::IllegalTransition { .. } => StatusCode::CONFLICT,
            Error::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
