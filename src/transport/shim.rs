//! Function-style entry points shared by the HTTP server and the Lambda binary.
//!
//! The shim checks the method, pulls the form fields out of the body, hands the
//! raw values to the collaborator and relays its bytes unchanged. It never
//! looks inside a successful payload.

use crate::domain::model::CheckPayload;
use crate::domain::ports::Collaborator;
use crate::utils::error::{AnalyzerError, Result};
use std::borrow::Cow;
use std::sync::Arc;

pub const CONTENT_TYPE_JSON: &str = "application/json";

const MISSING_EQUATION: &str = "Please enter a differential equation.";
const MISSING_DE_OR_SOLUTION: &str =
    "Please enter both the differential equation and the proposed solution.";

#[derive(Debug, Clone, Default)]
pub struct FunctionRequest {
    pub method: String,
    /// `application/x-www-form-urlencoded` body, if any.
    pub body: Option<String>,
}

impl FunctionRequest {
    pub fn post(body: impl Into<String>) -> Self {
        Self {
            method: "POST".to_string(),
            body: Some(body.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl FunctionResponse {
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            status_code: 200,
            headers: vec![("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string())],
            body,
        }
    }

    pub fn json(status_code: u16, payload: &CheckPayload) -> Self {
        // CheckPayload only holds strings, serialization cannot fail
        let body = serde_json::to_vec(payload).unwrap_or_default();
        Self {
            status_code,
            headers: vec![("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string())],
            body,
        }
    }

    pub fn from_error(error: &AnalyzerError) -> Self {
        let status_code = error.status_code();
        let message = if status_code >= 500 {
            format!("Internal server error: {}", error)
        } else {
            error.to_string()
        };
        Self::json(status_code, &CheckPayload::error(message))
    }

    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Decoded form fields, in body order.
#[derive(Debug, Clone, Default)]
pub struct FormParams(Vec<(String, String)>);

impl FormParams {
    pub fn parse(body: &str) -> Self {
        Self(
            url::form_urlencoded::parse(body.as_bytes())
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect(),
        )
    }

    /// First value for `key`, like `URLSearchParams.get`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }
}

fn require_post(method: &str) -> Result<()> {
    if method != "POST" {
        return Err(AnalyzerError::MethodNotAllowed {
            method: method.to_string(),
        });
    }
    Ok(())
}

fn missing(message: &str) -> AnalyzerError {
    AnalyzerError::MissingParameterError {
        message: message.to_string(),
    }
}

pub struct TransportShim {
    collaborator: Arc<dyn Collaborator>,
}

impl TransportShim {
    pub fn new(collaborator: Arc<dyn Collaborator>) -> Self {
        Self { collaborator }
    }

    pub fn collaborator_name(&self) -> &str {
        self.collaborator.name()
    }

    /// Form field `equation` is required.
    pub async fn check_linearity(&self, request: &FunctionRequest) -> FunctionResponse {
        respond(self.try_check_linearity(request).await)
    }

    /// Form fields `de` and `solution` are required.
    pub async fn verify_solution(&self, request: &FunctionRequest) -> FunctionResponse {
        respond(self.try_verify_solution(request).await)
    }

    async fn try_check_linearity(&self, request: &FunctionRequest) -> Result<Vec<u8>> {
        require_post(&request.method)?;
        let params = FormParams::parse(request.body.as_deref().unwrap_or_default());

        let equation = params
            .non_empty("equation")
            .ok_or_else(|| missing(MISSING_EQUATION))?;

        self.collaborator.check_linearity(equation).await
    }

    async fn try_verify_solution(&self, request: &FunctionRequest) -> Result<Vec<u8>> {
        require_post(&request.method)?;
        let params = FormParams::parse(request.body.as_deref().unwrap_or_default());

        let (de, solution) = match (params.non_empty("de"), params.non_empty("solution")) {
            (Some(de), Some(solution)) => (de, solution),
            _ => return Err(missing(MISSING_DE_OR_SOLUTION)),
        };

        self.collaborator.verify_solution(de, solution).await
    }
}

fn respond(result: Result<Vec<u8>>) -> FunctionResponse {
    match result {
        Ok(body) => FunctionResponse::ok(body),
        Err(e) => {
            if e.status_code() >= 500 {
                tracing::error!(
                    "❌ Collaborator failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            } else {
                tracing::warn!("Rejected request: {}", e);
            }
            FunctionResponse::from_error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_params_first_value_wins() {
        let params = FormParams::parse("equation=y%27+%2B+y+%3D+0&equation=other");
        assert_eq!(params.get("equation"), Some("y' + y = 0"));
        assert_eq!(params.get("de"), None);
    }

    #[test]
    fn test_form_params_empty_value() {
        let params = FormParams::parse("de=&solution=y%3De%5Ex");
        assert_eq!(params.get("de"), Some(""));
        assert_eq!(params.non_empty("de"), None);
        assert_eq!(params.non_empty("solution"), Some("y=e^x"));
    }

    #[test]
    fn test_error_responses() {
        let response = FunctionResponse::from_error(&AnalyzerError::MethodNotAllowed {
            method: "GET".to_string(),
        });
        assert_eq!(response.status_code, 405);
        assert_eq!(
            response.body_text(),
            r#"{"status":"error","message":"Method Not Allowed"}"#
        );

        let response = FunctionResponse::from_error(&AnalyzerError::ProcessExitError {
            program: "python".to_string(),
            code: 1,
        });
        assert_eq!(response.status_code, 500);
        assert!(response
            .body_text()
            .contains("Internal server error: python process exited with code 1"));
    }
}
