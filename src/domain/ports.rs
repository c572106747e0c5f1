use crate::utils::error::{AnalyzerError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Which collaborator answers the checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process pattern matching and known-case lookup.
    Heuristic,
    /// External checker scripts run through an interpreter.
    Script,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Heuristic => write!(f, "heuristic"),
            BackendKind::Script => write!(f, "script"),
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heuristic" => Ok(BackendKind::Heuristic),
            "script" => Ok(BackendKind::Script),
            other => Err(AnalyzerError::InvalidConfigValueError {
                field: "backend".to_string(),
                value: other.to_string(),
                reason: "Expected 'heuristic' or 'script'".to_string(),
            }),
        }
    }
}

/// Collaborator settings, whichever source they were loaded from.
pub trait ConfigProvider: Send + Sync {
    fn backend(&self) -> BackendKind;
    fn interpreter(&self) -> &str;
    fn scripts_dir(&self) -> &str;
    fn linearity_script(&self) -> &str;
    fn verifier_script(&self) -> &str;
}

/// Something that accepts equation/solution text and returns the response
/// payload bytes. The transport layer relays those bytes without reading them.
#[async_trait]
pub trait Collaborator: Send + Sync {
    fn name(&self) -> &str;
    async fn check_linearity(&self, equation: &str) -> Result<Vec<u8>>;
    async fn verify_solution(&self, de: &str, solution: &str) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_from_str() {
        assert_eq!("heuristic".parse::<BackendKind>().unwrap(), BackendKind::Heuristic);
        assert_eq!(" Script ".parse::<BackendKind>().unwrap(), BackendKind::Script);
        assert!("sympy".parse::<BackendKind>().is_err());
    }
}
