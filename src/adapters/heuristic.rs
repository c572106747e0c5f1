use crate::core::{linearity, matcher};
use crate::domain::model::CheckPayload;
use crate::domain::ports::Collaborator;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Answers checks in-process with the marker classifier and the known-case
/// table, printing JSON equivalent to what the checker scripts print.
#[derive(Debug, Clone, Default)]
pub struct HeuristicCollaborator;

impl HeuristicCollaborator {
    pub fn new() -> Self {
        Self
    }

    pub fn linearity_payload(&self, equation: &str) -> CheckPayload {
        if linearity::classify(equation) {
            CheckPayload::success(format!("The differential equation '{}' is linear.", equation))
        } else {
            CheckPayload::error(format!(
                "The differential equation '{}' is not linear.",
                equation
            ))
        }
    }

    pub fn verification_payload(&self, de: &str, solution: &str) -> CheckPayload {
        let result = matcher::verify(de, solution);
        tracing::debug!(
            "Known-case lookup for '{}' / '{}': valid={}",
            de,
            solution,
            result.is_valid
        );

        if result.is_valid {
            CheckPayload::success(format!(
                "The function '{}' is a valid solution to the differential equation '{}'.",
                solution, de
            ))
        } else {
            CheckPayload::error(format!(
                "The function '{}' is not a valid solution to the differential equation '{}'. {}",
                solution, de, result.reason
            ))
        }
    }
}

#[async_trait]
impl Collaborator for HeuristicCollaborator {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn check_linearity(&self, equation: &str) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.linearity_payload(equation))?)
    }

    async fn verify_solution(&self, de: &str, solution: &str) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.verification_payload(de, solution))?)
    }
}
