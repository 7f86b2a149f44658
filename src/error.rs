//! HTTP error mapping.
//!
//! Client errors echo their message; server errors answer with a generic
//! message and keep the cause in the log.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{context}")]
    Persistence {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },
    #[error("failed to encode stored document")]
    Encoding(#[from] serde_json::Error),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("page not found")]
    Page(#[from] std::io::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Wraps a store failure with the message the caller will see.
    pub fn persistence(context: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Persistence { context, source }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::Page(_) => StatusCode::NOT_FOUND,
            Self::Persistence { .. } | Self::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Persistence { context, source } => {
                error!(error = %source, "{context}");
            }
            Self::Encoding(source) => {
                error!(error = %source, "document encoding failed");
            }
            Self::Page(source) => {
                error!(error = %source, "landing document unavailable");
            }
            Self::Validation(_) | Self::NotFound(_) => {}
        }

        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
