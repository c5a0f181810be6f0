use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Missing required env var: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("HTTP {status} {method} {path}: {body}")]
    ApiError {
        status: u16,
        method: String,
        path: String,
        body: String,
    },

    #[error("Unexpected classes response format: {message}")]
    FormatError { message: String },

    #[error(
        "No AVAILABLE classes found for your filters (slot={slot}, center={center_id}, workouts={})",
        .workout_ids.join(",")
    )]
    NoAvailabilityError {
        slot: String,
        center_id: String,
        workout_ids: Vec<String>,
    },
}

impl BookingError {
    pub fn format(message: impl Into<String>) -> Self {
        Self::FormatError {
            message: message.into(),
        }
    }

    /// 啟動階段的配置錯誤，發生時不應發出任何網路請求
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingConfigError { .. }
                | Self::InvalidConfigValueError { .. }
                | Self::ConfigError { .. }
        )
    }

    pub fn is_retryable(&self) -> bool {
        !self.is_configuration()
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_configuration() {
            2
        } else {
            1
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Check the CUREFIT_* and RETRY_* environment variables"
            }
            Self::ConfigError { .. } => "Check that the session tokens are valid header values",
            Self::TransportError(_) => "Check network connectivity and CUREFIT_HOST",
            Self::ApiError { status: 401 | 403, .. } => {
                "Session tokens may have expired; refresh CUREFIT_ST and CUREFIT_AT"
            }
            Self::ApiError { .. } => "The provider rejected the request; inspect the response body",
            Self::FormatError { .. } => "The provider API may have changed its response schema",
            Self::NoAvailabilityError { .. } => {
                "Try another slot or center, or add more workout ids to the preference list"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
