use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("source is missing required columns: {0}")]
    MissingColumns(String),

    #[error("row {row} is invalid: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("source contains no questions")]
    EmptySource,

    #[error("unknown quiz source: {0}")]
    SourceNotFound(String),

    #[error("no quiz sources are available")]
    NoSourcesAvailable,

    #[error("question '{0}' not found")]
    QuestionNotFound(String),

    #[error("position {position} is out of range for {total} questions")]
    OutOfRange { position: usize, total: usize },

    #[error("choice {0} is outside the 1-4 range")]
    InvalidChoice(i64),

    #[error("{0}")]
    StaleAnswer(String),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingColumns(_) => "SCHEMA_ERROR",
            AppError::InvalidRow { .. } => "ROW_VALIDATION_ERROR",
            AppError::EmptySource => "EMPTY_SOURCE",
            AppError::SourceNotFound(_) => "SOURCE_NOT_FOUND",
            AppError::NoSourcesAvailable => "NO_SOURCES",
            AppError::QuestionNotFound(_) => "NOT_FOUND",
            AppError::OutOfRange { .. } => "OUT_OF_RANGE",
            AppError::InvalidChoice(_) => "INVALID_CHOICE",
            AppError::StaleAnswer(_) => "STALE_ANSWER",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Io(_) | AppError::Csv(_) => "SOURCE_READ_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
    pub code: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::SourceNotFound(_)
            | AppError::QuestionNotFound(_)
            | AppError::InvalidChoice(_)
            | AppError::StaleAnswer(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::MissingColumns(_)
            | AppError::InvalidRow { .. }
            | AppError::EmptySource
            | AppError::NoSourcesAvailable
            | AppError::OutOfRange { .. }
            | AppError::Io(_)
            | AppError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            kind: self.error_code(),
            code: self.status_code().as_u16(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::SourceNotFound("trivia.csv".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::StaleAnswer("not the current question".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidRow {
                row: 3,
                reason: "answer must be an integer between 1 and 4".into(),
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::MissingColumns("answer, explanation".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::InvalidRow {
            row: 2,
            reason: "choice3 is empty".into(),
        };
        assert_eq!(err.to_string(), "row 2 is invalid: choice3 is empty");

        let err = AppError::QuestionNotFound("q9".into());
        assert_eq!(err.to_string(), "question 'q9' not found");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(AppError::EmptySource.error_code(), "EMPTY_SOURCE");
        assert_eq!(AppError::InvalidChoice(7).error_code(), "INVALID_CHOICE");
        assert_eq!(
            AppError::OutOfRange {
                position: 5,
                total: 3
            }
            .error_code(),
            "OUT_OF_RANGE"
        );
    }
}
