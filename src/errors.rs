use std::borrow::Cow;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use crate::constants::UNIQUE_VIOLATION;

const GENERIC_SERVER_ERROR: &str = "Terjadi kesalahan pada server.";

#[derive(Debug, Display)]
pub enum AppError {
    #[display("{message}")]
    ValidationError { message: String, detail: Option<String> },

    #[display("{_0}")]
    NotFound(String),

    #[display("{_0}")]
    Conflict(String),

    #[display("{message}")]
    InternalError { message: String, detail: Option<String> },
}

/// JSON body shared by every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub detail: Option<String>,
}

impl AppError {
    pub fn internal(message: impl Into<String>, detail: impl Into<String>) -> Self {
        AppError::InternalError { message: message.into(), detail: Some(detail.into()) }
    }

    /// Builds a 400 whose detail names every field that failed validation.
    pub fn missing_fields(message: impl Into<String>, errors: &ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<&str> = field_errors.keys().map(|f| f.as_ref()).collect();
        fields.sort_unstable();

        AppError::ValidationError {
            message: message.into(),
            detail: Some(fields.join(", ")),
        }
    }

    /// Replaces the user-facing message of an internal error, keeping its detail.
    pub fn context(self, message: impl Into<String>) -> Self {
        match self {
            AppError::InternalError { detail, .. } => AppError::InternalError {
                message: message.into(),
                detail,
            },
            other => other,
        }
    }

    /// Like [`AppError::context`] but folds every non-validation error into a 500.
    pub fn into_internal(self, message: impl Into<String>) -> Self {
        match self {
            err @ AppError::ValidationError { .. } => err,
            AppError::InternalError { detail, .. } => AppError::InternalError {
                message: message.into(),
                detail,
            },
            other => AppError::internal(message, other.to_string()),
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            AppError::ValidationError { detail, .. } | AppError::InternalError { detail, .. } => {
                detail.as_deref()
            }
            _ => None,
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        if let AppError::InternalError { message, detail } = self {
            tracing::error!(detail = detail.as_deref().unwrap_or(""), "{}", message);
        }

        let body = ErrorBody {
            message: self.to_string(),
            detail: self.detail().map(str::to_string),
        };

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed(UNIQUE_VIOLATION)) => {
                AppError::Conflict("Database conflict occurred".into())
            }
            _ => AppError::internal(GENERIC_SERVER_ERROR, err.to_string()),
        }
    }
}
