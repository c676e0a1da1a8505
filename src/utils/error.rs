use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReservationError {
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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Seating chart error on line {line}: {message}")]
    ChartFormatError { line: usize, message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("No seats available for a group of {requested}")]
    NoneAvailable { requested: usize },

    #[error("Reservation of {requested} seats declined")]
    DeclinedByUser { requested: usize },

    #[error("Commit rejected: {message}")]
    CommitRejected { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Chart,
    Request,
    Availability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReservationError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) => ErrorCategory::Io,
            Self::SerializationError(_) | Self::CsvError(_) => ErrorCategory::Io,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::ChartFormatError { .. } => ErrorCategory::Chart,
            Self::InvalidRequest { .. } | Self::DeclinedByUser { .. } => ErrorCategory::Request,
            Self::NoneAvailable { .. } | Self::CommitRejected { .. } => {
                ErrorCategory::Availability
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DeclinedByUser { .. } => ErrorSeverity::Low,
            Self::InvalidRequest { .. }
            | Self::NoneAvailable { .. }
            | Self::CommitRejected { .. } => ErrorSeverity::Medium,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::ChartFormatError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) | Self::CsvError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    /// 使用者端可回復的錯誤（回到選單即可）
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Request | ErrorCategory::Availability
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the chart file exists and is readable/writable",
            Self::SerializationError(_) | Self::CsvError(_) => {
                "Try a different --report-format"
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Fix the configuration file or CLI flags",
            Self::ChartFormatError { .. } => {
                "Each line must be one row of at most 26 seat codes ('.' for an empty seat)"
            }
            Self::InvalidRequest { .. } => {
                "Pick an existing row and request at least one ticket"
            }
            Self::NoneAvailable { .. } => "Try a smaller group",
            Self::DeclinedByUser { .. } => "Choose another starting seat",
            Self::CommitRejected { .. } => "Search again; the seats changed since the offer",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NoneAvailable { .. } => "No seats available.".to_string(),
            Self::DeclinedByUser { .. } => "Reservation declined. Returning to menu.".to_string(),
            Self::IoError(e) => format!("Could not access the seating chart: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReservationError>;
