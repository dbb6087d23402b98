use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contract_intake::{IngestError, IntakeError, SourceFormat};
use serde::{Deserialize, Serialize};

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Upload exceeds the {0}MB limit.")]
    PayloadTooLarge(usize),

    #[error("{0}")]
    Intake(#[from] IntakeError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

/// API error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Intake(err) => StatusCode::from_u16(err.ingest_error().http_status_code())
                .unwrap_or(StatusCode::UNPROCESSABLE_ENTITY),
            ServerError::Internal(_) | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ServerError::Intake(err) => match (err.ingest_error(), err.format()) {
                (IngestError::Parse(_), SourceFormat::Csv) => "CSV_PARSE_ERROR",
                (IngestError::Parse(_), SourceFormat::Json) => "JSON_PARSE_ERROR",
                (IngestError::TooManyRecords { .. }, _) => "TOO_MANY_RECORDS",
                _ => "BAD_REQUEST",
            },
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }

    /// User-facing message plus optional parser details.
    fn message_and_details(&self) -> (String, Option<String>) {
        match self {
            ServerError::Intake(err) => match err.ingest_error() {
                IngestError::Parse(details) => {
                    let message = match err.format() {
                        SourceFormat::Csv => "Failed to parse CSV upload.",
                        SourceFormat::Json => "Failed to process JSON payload.",
                    };
                    (message.to_string(), Some(details.clone()))
                }
                other => (other.to_string(), None),
            },
            other => (other.to_string(), None),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (message, details) = self.message_and_details();

        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}
