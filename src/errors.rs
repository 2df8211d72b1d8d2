use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use std::fmt;

use crate::store::StoreError;

/// Malformed input. Each variant has a stable reason code so clients can
/// tell "bad option" from "nothing to cancel".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyOptions,
    BlankOption,
    DuplicateOption(String),
    InvalidOption(String),
    MultipleNotAllowed,
    NoExistingBallot(String),
    MissingVoter,
}

impl ValidationError {
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::EmptyOptions => "EMPTY_OPTIONS",
            ValidationError::BlankOption => "BLANK_OPTION",
            ValidationError::DuplicateOption(_) => "DUPLICATE_OPTION",
            ValidationError::InvalidOption(_) => "INVALID_OPTION",
            ValidationError::MultipleNotAllowed => "MULTIPLE_NOT_ALLOWED",
            ValidationError::NoExistingBallot(_) => "NO_EXISTING_BALLOT",
            ValidationError::MissingVoter => "MISSING_VOTER",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyOptions => write!(f, "A poll needs at least one option"),
            ValidationError::BlankOption => write!(f, "Option labels must not be blank"),
            ValidationError::DuplicateOption(o) => write!(f, "Option '{o}' is listed more than once"),
            ValidationError::InvalidOption(o) => write!(f, "'{o}' is not an option of this poll"),
            ValidationError::MultipleNotAllowed => {
                write!(f, "This poll accepts a single option per voter")
            }
            ValidationError::NoExistingBallot(v) => write!(f, "'{v}' has not voted on this poll"),
            ValidationError::MissingVoter => write!(f, "A voter name is required"),
        }
    }
}

/// Operation not allowed in the poll's current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
    PollClosed(String),
    /// The voter's ballot predates per-voter records and cannot be changed.
    BallotLocked(String),
}

impl ConflictError {
    pub fn reason(&self) -> &'static str {
        match self {
            ConflictError::PollClosed(_) => "POLL_CLOSED",
            ConflictError::BallotLocked(_) => "BALLOT_LOCKED",
        }
    }
}

impl fmt::Display for ConflictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictError::PollClosed(id) => write!(f, "Poll {id} is closed"),
            ConflictError::BallotLocked(v) => {
                write!(f, "'{v}' voted before individual ballots were recorded; that vote is final")
            }
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Conflict(ConflictError),
    Validation(ValidationError),
    /// Lock wait exceeded; safe to retry.
    Busy(String),
    Storage(StoreError),
}

/// JSON body returned for every error response.
#[derive(Serialize, Debug, Clone)]
pub struct ApiErrorResponse {
    pub error: String,
    pub reason: String,
    pub message: String,
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Busy(_) => "BUSY",
            AppError::Storage(_) => "STORAGE_ERROR",
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(c) => c.reason(),
            AppError::Validation(v) => v.reason(),
            AppError::Busy(_) => "BUSY",
            AppError::Storage(_) => "STORAGE_ERROR",
        }
    }

    pub fn poll_not_found(id: &str) -> Self {
        AppError::NotFound(format!("Poll {id} not found"))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {msg}"),
            AppError::Conflict(e) => write!(f, "Conflict: {e}"),
            AppError::Validation(e) => write!(f, "Validation error: {e}"),
            AppError::Busy(msg) => write!(f, "Busy: {msg}"),
            AppError::Storage(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Busy(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::NotFound(msg) | AppError::Busy(msg) => msg.clone(),
            AppError::Conflict(e) => e.to_string(),
            AppError::Validation(e) => e.to_string(),
            AppError::Storage(_) => {
                log::error!("{self}");
                "Storage operation failed".to_string()
            }
        };
        let body = ApiErrorResponse {
            error: self.kind().to_string(),
            reason: self.reason().to_string(),
            message,
        };

        let mut builder = HttpResponse::build(self.status_code());
        if let AppError::Busy(_) = self {
            builder.insert_header(("Retry-After", "1"));
        }
        builder.json(body)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Busy { .. } => AppError::Busy(e.to_string()),
            other => AppError::Storage(other),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

impl From<ConflictError> for AppError {
    fn from(e: ConflictError) -> Self {
        AppError::Conflict(e)
    }
}
