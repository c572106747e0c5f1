use crate::core::normalizer::normalize;
use regex::Regex;
use std::sync::LazyLock;

/// Textual markers that make an equation non-linear.
///
/// The list is a heuristic with known gaps (e.g. `y''*y''` slips through) and
/// known false positives (any `e^` followed later by a `y`). Callers rely on
/// this exact behavior, so markers must not be added or tightened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonlinearMarker {
    PowerOfY,
    YTimesY,
    SinOfY,
    CosOfY,
    TanOfY,
    ExponentialOfY,
    LnOfY,
    LogOfY,
    YTimesDerivative,
    DerivativeTimesY,
    DerivativeTimesDerivative,
    PowerOfDerivative,
}

impl NonlinearMarker {
    pub const ALL: [NonlinearMarker; 12] = [
        NonlinearMarker::PowerOfY,
        NonlinearMarker::YTimesY,
        NonlinearMarker::SinOfY,
        NonlinearMarker::CosOfY,
        NonlinearMarker::TanOfY,
        NonlinearMarker::ExponentialOfY,
        NonlinearMarker::LnOfY,
        NonlinearMarker::LogOfY,
        NonlinearMarker::YTimesDerivative,
        NonlinearMarker::DerivativeTimesY,
        NonlinearMarker::DerivativeTimesDerivative,
        NonlinearMarker::PowerOfDerivative,
    ];

    pub fn pattern(self) -> &'static str {
        match self {
            NonlinearMarker::PowerOfY => r"y\^[0-9]+",
            NonlinearMarker::YTimesY => r"y\*y",
            NonlinearMarker::SinOfY => r"sin\(.*y.*\)",
            NonlinearMarker::CosOfY => r"cos\(.*y.*\)",
            NonlinearMarker::TanOfY => r"tan\(.*y.*\)",
            NonlinearMarker::ExponentialOfY => r"e\^.*y.*",
            NonlinearMarker::LnOfY => r"ln\(.*y.*\)",
            NonlinearMarker::LogOfY => r"log\(.*y.*\)",
            NonlinearMarker::YTimesDerivative => r"y.*\*.*y'",
            NonlinearMarker::DerivativeTimesY => r"y'.*\*.*y",
            NonlinearMarker::DerivativeTimesDerivative => r"y'.*\*.*y'",
            NonlinearMarker::PowerOfDerivative => r"y'.*\^[0-9]+",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            NonlinearMarker::PowerOfY => "y raised to a power",
            NonlinearMarker::YTimesY => "y multiplied by y",
            NonlinearMarker::SinOfY => "sin containing y",
            NonlinearMarker::CosOfY => "cos containing y",
            NonlinearMarker::TanOfY => "tan containing y",
            NonlinearMarker::ExponentialOfY => "e^ containing y",
            NonlinearMarker::LnOfY => "ln containing y",
            NonlinearMarker::LogOfY => "log containing y",
            NonlinearMarker::YTimesDerivative => "y multiplied by y'",
            NonlinearMarker::DerivativeTimesY => "y' multiplied by y",
            NonlinearMarker::DerivativeTimesDerivative => "y' multiplied by y'",
            NonlinearMarker::PowerOfDerivative => "y' raised to a power",
        }
    }
}

static MARKERS: LazyLock<Vec<(NonlinearMarker, Regex)>> = LazyLock::new(|| {
    NonlinearMarker::ALL
        .iter()
        .map(|&marker| {
            let regex = Regex::new(marker.pattern()).expect("nonlinear marker patterns are valid");
            (marker, regex)
        })
        .collect()
});

/// First marker (in priority order) found in an already normalized equation.
pub fn find_nonlinear_marker(normalized: &str) -> Option<NonlinearMarker> {
    MARKERS
        .iter()
        .find(|(_, regex)| regex.is_match(normalized))
        .map(|(marker, _)| *marker)
}

/// `true` unless the normalized equation contains a nonlinear marker.
pub fn is_linear(normalized: &str) -> bool {
    match find_nonlinear_marker(normalized) {
        Some(marker) => {
            tracing::debug!(
                "Non-linear term detected in '{}': {}",
                normalized,
                marker.description()
            );
            false
        }
        None => true,
    }
}

/// Normalizes raw user input, then classifies it.
pub fn classify(equation: &str) -> bool {
    is_linear(&normalize(equation))
}
