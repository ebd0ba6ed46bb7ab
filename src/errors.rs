// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API Error: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    #[error("Failed to fetch data")]
    NoData,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Configuration(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "API key is not configured".to_string(),
            ),
            AppError::Upstream { status, message } => {
                let code = status
                    .and_then(|s| StatusCode::from_u16(s).ok())
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                (code, format!("API Error: {}", message))
            }
            AppError::NoData => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch data".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string(),
            "success": false,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream {
            status: err.status().map(|s| s.as_u16()),
            message: format!("HTTP request failed: {}", err),
        }
    }
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn upstream(status: Option<u16>, msg: impl Into<String>) -> Self {
        AppError::Upstream {
            status,
            message: msg.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
