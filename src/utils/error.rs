use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("{entity} with id {id} does not exist")]
    NotFound { entity: &'static str, id: i32 },

    #[error("Repository error: {message}")]
    RepositoryError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2, // 輸入錯誤
            ErrorSeverity::High => 1,   // 配置錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

impl BookingError {
    pub fn invalid_argument<M: Into<String>>(message: M) -> Self {
        BookingError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn repository<M: Into<String>>(message: M) -> Self {
        BookingError::RepositoryError {
            message: message.into(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, BookingError::InvalidArgument { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            BookingError::InvalidArgument { .. } | BookingError::NotFound { .. } => {
                ErrorCategory::Input
            }
            BookingError::RepositoryError { .. }
            | BookingError::IoError(_)
            | BookingError::SerializationError(_)
            | BookingError::CsvError(_) => ErrorCategory::Storage,
            BookingError::ConfigError { .. }
            | BookingError::ConfigValidationError { .. }
            | BookingError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            BookingError::InvalidArgument { message } => format!("Invalid date range: {}", message),
            BookingError::NotFound { entity, id } => format!("No {} found with id {}", entity, id),
            BookingError::IoError(_) | BookingError::SerializationError(_) => {
                "Could not read or write the booking data files".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Use a start date after today and an end date on or after the start date"
            }
            ErrorCategory::Storage => "Check that the data directory exists and contains valid JSON",
            ErrorCategory::Configuration => "Check the configuration file and command line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
