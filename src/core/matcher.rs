use crate::core::equivalence::is_equivalent;
use crate::core::normalizer::normalize;
use crate::domain::model::{KnownCase, VerificationResult};

pub const UNKNOWN_CASE_REASON: &str =
    "Cannot verify this solution. Please try one of the example cases.";

const E_X_REASON: &str = "Substituting y = e^x gives e^x + e^x = 2e^x ≠ 0";

/// Searched in order; the first matching record wins.
pub static KNOWN_CASES: &[KnownCase] = &[
    KnownCase {
        equation: "y' + y = 0",
        solution: "y = C*e^(-x)",
        is_valid: true,
        reason: None,
    },
    KnownCase {
        equation: "y' + y = 0",
        solution: "y = e^(-x)",
        is_valid: true,
        reason: None,
    },
    KnownCase {
        equation: "y' + y = 0",
        solution: "y = e^x",
        is_valid: false,
        reason: Some(E_X_REASON),
    },
    KnownCase {
        equation: "y'' + y = 0",
        solution: "y = sin(x)",
        is_valid: true,
        reason: None,
    },
    KnownCase {
        equation: "y'' + y = 0",
        solution: "y = cos(x)",
        is_valid: true,
        reason: None,
    },
    KnownCase {
        equation: "y'' + y = 0",
        solution: "y = A*sin(x) + B*cos(x)",
        is_valid: true,
        reason: None,
    },
    KnownCase {
        equation: "y'' + y = 0",
        solution: "y = e^x",
        is_valid: false,
        reason: Some(E_X_REASON),
    },
    KnownCase {
        equation: "y' = y^2 + x",
        solution: "y = tan(x)",
        is_valid: false,
        reason: Some("This is a Riccati equation and tan(x) is not a solution."),
    },
    KnownCase {
        equation: "y'' - 4y' + 4y = 0",
        solution: "y = (C1 + C2x)e^(2x)",
        is_valid: true,
        reason: None,
    },
    KnownCase {
        equation: "y'' - 4y' + 4y = 0",
        solution: "y = C1*e^(2x) + C2*x*e^(2x)",
        is_valid: true,
        reason: None,
    },
    KnownCase {
        equation: "y' + 2y = e^x",
        solution: "y = (1/3)e^x + Ce^(-2x)",
        is_valid: true,
        reason: None,
    },
];

/// Looks a normalized (equation, solution) pair up in [`KNOWN_CASES`].
pub fn match_solution(normalized_equation: &str, normalized_solution: &str) -> VerificationResult {
    for case in KNOWN_CASES {
        if normalize(case.equation) != normalized_equation {
            continue;
        }

        let case_solution = normalize(case.solution);
        if case_solution == normalized_solution || is_equivalent(&case_solution, normalized_solution) {
            return VerificationResult {
                is_valid: case.is_valid,
                reason: case.reason.unwrap_or_default().to_string(),
            };
        }
    }

    VerificationResult {
        is_valid: false,
        reason: UNKNOWN_CASE_REASON.to_string(),
    }
}

/// Normalizes both raw inputs, then matches them.
pub fn verify(equation: &str, solution: &str) -> VerificationResult {
    match_solution(&normalize(equation), &normalize(solution))
}
