use axum::http::StatusCode;
use thiserror::Error;

/// 簽章驗證失敗的原因 (只記錄於日誌，對外一律 401)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("invalid timestamp header: {value:?}")]
    InvalidTimestamp { value: String },

    #[error("timestamp {timestamp} is outside the replay window (now {now})")]
    Stale { timestamp: i64, now: i64 },

    #[error("signature mismatch")]
    Mismatch,

    #[error("signing key rejected by HMAC")]
    InvalidKey,
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("form body has no payload field")]
    MissingPayload,

    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("unsupported content type: {content_type}")]
    UnsupportedMediaType { content_type: String },
}

#[derive(Error, Debug)]
pub enum ResponderError {
    #[error("Method {method} is not allowed")]
    MethodNotAllowed { method: String },

    #[error("Failed to read request body: {message}")]
    BodyReadError { message: String },

    #[error("Signature verification failed: {0}")]
    SignatureInvalid(#[from] SignatureError),

    #[error("Decode error: {0}")]
    DecodeError(#[from] DecodeError),

    #[error("Serialization error: {0}")]
    SerializationError(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },
}

impl ResponderError {
    /// 對應的 HTTP 狀態碼
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::BodyReadError { .. } => StatusCode::BAD_REQUEST,
            Self::SignatureInvalid(_) => StatusCode::UNAUTHORIZED,
            Self::DecodeError(DecodeError::UnsupportedMediaType { .. }) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            Self::DecodeError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 回給呼叫端的通用訊息，不含任何內部細節
    pub fn public_message(&self) -> &'static str {
        match self.status_code() {
            StatusCode::METHOD_NOT_ALLOWED => "Method not allowed",
            StatusCode::BAD_REQUEST => "Bad request",
            StatusCode::UNAUTHORIZED => "Unauthorized",
            StatusCode::UNSUPPORTED_MEDIA_TYPE => "Unsupported media type",
            _ => "Internal server error",
        }
    }

    /// 啟動階段的錯誤 (非單一請求)
    pub fn is_startup_error(&self) -> bool {
        matches!(
            self,
            Self::IoError(_)
                | Self::ConfigError { .. }
                | Self::MissingConfigError { .. }
                | Self::InvalidConfigValueError { .. }
                | Self::CatalogError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingConfigError { field } => {
                format!("Required setting {} is not set", field)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting {} is invalid: {}", field, reason)
            }
            Self::IoError(e) => format!("Could not read a required file: {}", e),
            Self::CatalogError { message } => format!("The catalog could not be loaded: {}", message),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingConfigError { .. } => {
                "Export the missing environment variable (e.g. SLACK_SIGNING_SECRET) and restart"
            }
            Self::InvalidConfigValueError { .. } | Self::ConfigError { .. } => {
                "Check the environment variables and command line flags"
            }
            Self::IoError(_) => "Check that CONFIG_FILE points to an existing, readable file",
            Self::CatalogError { .. } => {
                "Fix the catalog file: it must be a list of {\"actionId\", \"options\"} entries"
            }
            _ => "Inspect the server logs for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, ResponderError>;
