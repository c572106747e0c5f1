use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Method Not Allowed")]
    MethodNotAllowed { method: String },

    #[error("{message}")]
    MissingParameterError { message: String },

    #[error("Failed to start {program}: {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} process exited with code {code}")]
    ProcessExitError { program: String, code: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Client,
    Collaborator,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AnalyzerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalyzerError::MethodNotAllowed { .. } | AnalyzerError::MissingParameterError { .. } => {
                ErrorCategory::Client
            }
            AnalyzerError::SpawnError { .. } | AnalyzerError::ProcessExitError { .. } => {
                ErrorCategory::Collaborator
            }
            AnalyzerError::ConfigValidationError { .. }
            | AnalyzerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AnalyzerError::IoError(_) | AnalyzerError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Client => ErrorSeverity::Low,
            ErrorCategory::Collaborator => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// HTTP status the transport layer answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AnalyzerError::MethodNotAllowed { .. } => 405,
            AnalyzerError::MissingParameterError { .. } => 400,
            _ => 500,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AnalyzerError::MethodNotAllowed { .. } => {
                "Send the request with the POST method".to_string()
            }
            AnalyzerError::MissingParameterError { .. } => {
                "Provide every required form field in the request body".to_string()
            }
            AnalyzerError::SpawnError { program, .. } => format!(
                "Check that '{}' is installed and on PATH, or switch to the heuristic backend",
                program
            ),
            AnalyzerError::ProcessExitError { .. } => {
                "Inspect the collaborator's stderr output in the logs".to_string()
            }
            AnalyzerError::ConfigValidationError { .. }
            | AnalyzerError::InvalidConfigValueError { .. } => {
                "Review the configuration file, CLI flags and environment variables".to_string()
            }
            AnalyzerError::IoError(_) => "Check file permissions and available disk space".to_string(),
            AnalyzerError::SerializationError(_) => {
                "This is likely a bug; please report it".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Client => self.to_string(),
            ErrorCategory::Collaborator => format!("The analysis backend failed: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("Unexpected system error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        let method = AnalyzerError::MethodNotAllowed {
            method: "GET".to_string(),
        };
        let missing = AnalyzerError::MissingParameterError {
            message: "Please enter a differential equation.".to_string(),
        };
        let exited = AnalyzerError::ProcessExitError {
            program: "python".to_string(),
            code: 1,
        };

        assert_eq!(method.status_code(), 405);
        assert_eq!(missing.status_code(), 400);
        assert_eq!(exited.status_code(), 500);
        assert_eq!(method.category(), ErrorCategory::Client);
        assert_eq!(exited.category(), ErrorCategory::Collaborator);
    }

    #[test]
    fn test_display_messages() {
        let exited = AnalyzerError::ProcessExitError {
            program: "python".to_string(),
            code: 2,
        };
        assert_eq!(exited.to_string(), "python process exited with code 2");

        let missing = AnalyzerError::MissingParameterError {
            message: "Please enter a differential equation.".to_string(),
        };
        assert_eq!(missing.to_string(), "Please enter a differential equation.");
        assert_eq!(missing.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_configuration_errors_stop_startup() {
        let errors = [
            AnalyzerError::ConfigValidationError {
                field: "port".to_string(),
                message: "must be positive".to_string(),
            },
            AnalyzerError::InvalidConfigValueError {
                field: "backend".to_string(),
                value: "sympy".to_string(),
                reason: "expected 'heuristic' or 'script'".to_string(),
            },
        ];
        for error in &errors {
            assert_eq!(error.category(), ErrorCategory::Configuration);
            assert_eq!(error.severity(), ErrorSeverity::High);
            assert_eq!(error.status_code(), 500);
            assert!(error.user_friendly_message().starts_with("Invalid configuration"));
        }
    }
}
