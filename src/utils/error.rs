use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    /// 遠端拒絕請求 (4xx/5xx)，保留原始回應內容
    #[error("HTTP error {status}: {body}")]
    HttpError { status: u16, body: String },

    /// 請求未送達或未取得回應 (DNS、連線被拒、逾時)
    #[error("Transport error: {0}")]
    TransportError(#[source] reqwest::Error),

    #[error("Unexpected error: {message}")]
    UnknownError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Remote,
    Transport,
    Configuration,
    Unknown,
}

impl From<reqwest::Error> for PublishError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            PublishError::TransportError(err)
        } else {
            PublishError::UnknownError {
                message: err.to_string(),
            }
        }
    }
}

impl PublishError {
    pub fn config(message: impl Into<String>) -> Self {
        PublishError::ConfigError {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PublishError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PublishError::HttpError { .. } => ErrorCategory::Remote,
            PublishError::TransportError(_) => ErrorCategory::Transport,
            PublishError::ConfigError { .. }
            | PublishError::ValidationError { .. }
            | PublishError::IoError(_) => ErrorCategory::Configuration,
            PublishError::UnknownError { .. } | PublishError::SerializationError(_) => {
                ErrorCategory::Unknown
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Remote => 1,
            ErrorCategory::Transport => 2,
            ErrorCategory::Configuration => 3,
            ErrorCategory::Unknown => 4,
        }
    }

    /// 從遠端錯誤內容擷取可讀訊息：`message` 欄位、`errors` 陣列，否則回退到狀態碼
    pub fn remote_message(&self) -> Option<String> {
        let PublishError::HttpError { status, body } = self else {
            return None;
        };

        let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
        let from_message = parsed
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(|v| v.as_str())
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        let from_errors = parsed
            .as_ref()
            .and_then(|v| v.get("errors"))
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .map(|item| match item.as_str() {
                        Some(s) => s.to_string(),
                        None => item.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .filter(|joined| !joined.is_empty());

        Some(from_message.or(from_errors).unwrap_or_else(|| {
            let reason = reqwest::StatusCode::from_u16(*status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown");
            format!("HTTP {}: {}", status, reason)
        }))
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PublishError::ValidationError { field, message } => {
                format!("Invalid value for {}: {}", field, message)
            }
            other => other.to_string(),
        }
    }

    /// 命令列輸出的錯誤報告：HTTP 錯誤附上狀態碼、可讀訊息與原始內容
    pub fn report(&self) -> String {
        match self {
            PublishError::HttpError { status, body } => format!(
                "❌ HTTP Error: {}\nMessage: {}\nResponse: {}",
                status,
                self.remote_message().unwrap_or_default(),
                body
            ),
            PublishError::TransportError(cause) => format!("❌ Request Error: {}", cause),
            other => format!("❌ Error: {}", other.user_friendly_message()),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Remote => "Check the payload fields and the API key for this environment",
            ErrorCategory::Transport => "Check network connectivity and the selected environment",
            ErrorCategory::Configuration => "Fix the settings file or command-line arguments",
            ErrorCategory::Unknown => "Re-run with --verbose and inspect the logs",
        }
    }
}

pub type Result<T> = std::result::Result<T, PublishError>;
