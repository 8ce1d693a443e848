use axum::http::StatusCode;
use std::fmt;

/// A Sale record whose fields cannot be interpreted. Aborts the whole
/// aggregation so totals are never computed over a partial record set.
#[derive(Debug, Clone, PartialEq)]
pub enum DataFormatError {
    MalformedDate { index: usize, value: String },
    NonNumericAmount { index: usize, value: String },
}

impl fmt::Display for DataFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedDate { index, value } => {
                write!(f, "record {index}: malformed date {value:?}")
            }
            Self::NonNumericAmount { index, value } => {
                write!(f, "record {index}: non-numeric amount {value:?}")
            }
        }
    }
}

impl std::error::Error for DataFormatError {}

/// The data source could not supply records.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceError {
    pub message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data source unavailable: {}", self.message)
    }
}

impl std::error::Error for SourceError {}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<DataFormatError> for AppError {
    fn from(err: DataFormatError) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: err.to_string(),
        }
    }
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: err.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
