use serde::{Deserialize, Serialize};

/// A hard-coded (equation, solution, verdict) record consulted in place of
/// symbolic verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownCase {
    pub equation: &'static str,
    pub solution: &'static str,
    pub is_valid: bool,
    pub reason: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub is_valid: bool,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Success,
    Error,
}

/// JSON body exchanged with the browser: what the checker scripts print and
/// what the shim answers with on client or server errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckPayload {
    pub status: CheckStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_url: Option<String>,
}

impl CheckPayload {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Success,
            message: message.into(),
            plot_url: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Error,
            message: message.into(),
            plot_url: None,
        }
    }
}
