//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A formatter name that was never registered on the logger
    #[error("Unknown formatter '{name}'")]
    UnknownFormatter { name: String },

    /// A strftime pattern chrono cannot render
    #[error("Invalid time format '{format}'")]
    InvalidTimeFormat { format: String },

    /// External logger with none of the recognized capability shapes
    #[error("Unsupported logger integration: {description}")]
    UnsupportedIntegration { description: String },

    /// Formatter error with format type
    #[error("Formatter error ({format_type}): {message}")]
    FormatterError {
        format_type: String,
        message: String,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn unknown_formatter(name: impl Into<String>) -> Self {
        LoggerError::UnknownFormatter { name: name.into() }
    }

    pub fn invalid_time_format(format: impl Into<String>) -> Self {
        LoggerError::InvalidTimeFormat {
            format: format.into(),
        }
    }

    pub fn unsupported_integration(description: impl Into<String>) -> Self {
        LoggerError::UnsupportedIntegration {
            description: description.into(),
        }
    }

    /// Create a formatter error
    pub fn formatter(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FormatterError {
            format_type: format_type.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("LoggerBuilder", "empty output list");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::unknown_formatter("yaml");
        assert!(matches!(err, LoggerError::UnknownFormatter { .. }));

        let err = LoggerError::unsupported_integration("opaque value");
        assert!(matches!(err, LoggerError::UnsupportedIntegration { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::unknown_formatter("yaml");
        assert_eq!(err.to_string(), "Unknown formatter 'yaml'");

        let err = LoggerError::invalid_time_format("%Q");
        assert_eq!(err.to_string(), "Invalid time format '%Q'");

        let err = LoggerError::formatter("json", "key must be a string");
        assert_eq!(
            err.to_string(),
            "Formatter error (json): key must be a string"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("opening log file", "/var/log/app.log", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("opening log file"));
        assert!(err.to_string().contains("/var/log/app.log"));
    }
}
