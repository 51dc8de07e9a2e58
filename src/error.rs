use crate::upstream::UpstreamError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Non autorisé")]
    Unauthorized,

    #[error("Outil inconnu: {0}")]
    UnknownTool(String),

    #[error("Argument manquant: {0}")]
    MissingArgument(String),

    #[error("Argument invalide '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, GatewayError>;

impl GatewayError {
    pub(crate) fn invalid_argument(name: &str, reason: impl Into<String>) -> Self {
        GatewayError::InvalidArgument {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Convert error to HTTP status code
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            GatewayError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::UnknownTool(_) => StatusCode::NOT_FOUND,
            GatewayError::MissingArgument(_) => StatusCode::BAD_REQUEST,
            GatewayError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            GatewayError::Upstream(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Json(_) => StatusCode::BAD_REQUEST,
            GatewayError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for GatewayError {
    fn from(err: anyhow::Error) -> Self {
        GatewayError::Internal(err.to_string())
    }
}

impl axum::response::IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": self.to_string(),
            "code": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
