use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, PartialEq, Eq)]
pub enum ApiError {
    #[display("{_0}")]
    NotFound(String),
    #[display("{_0}")]
    BadRequest(String),
    #[display("{_0}")]
    MethodNotAllowed(String),
    #[display("internal")]
    Internal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrBody {
    pub error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrBody {
            error: self.to_string(),
        })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RepoErr {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("duplicate id: {0}")]
    DuplicateId(String),
}

impl From<RepoErr> for ApiError {
    fn from(e: RepoErr) -> Self {
        tracing::error!(err = %e, "store rejected a validated write");
        ApiError::Internal
    }
}
