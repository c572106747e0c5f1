#[cfg(feature = "lambda")]
use de_analyzer::config::lambda::LambdaConfig;
#[cfg(feature = "lambda")]
use de_analyzer::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use de_analyzer::{
    build_collaborator, CheckPayload, FunctionRequest, FunctionResponse, TransportShim,
};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "lambda")]
use std::collections::HashMap;
#[cfg(feature = "lambda")]
use std::sync::Arc;

/// Netlify / API Gateway shaped function event.
#[cfg(feature = "lambda")]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub http_method: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[cfg(feature = "lambda")]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[cfg(feature = "lambda")]
impl From<FunctionResponse> for Response {
    fn from(response: FunctionResponse) -> Self {
        Self {
            status_code: response.status_code,
            body: response.body_text().into_owned(),
            headers: response.headers.into_iter().collect(),
        }
    }
}

#[cfg(feature = "lambda")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Linearity,
    Verify,
}

#[cfg(feature = "lambda")]
impl Route {
    /// Matches on the last path segment, so `/.netlify/functions/check_linearity`
    /// and `/linearity` both resolve.
    fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/').rsplit('/').next()? {
            "linearity" | "check_linearity" => Some(Route::Linearity),
            "verify" | "verify_solution" => Some(Route::Verify),
            _ => None,
        }
    }
}

#[cfg(feature = "lambda")]
async fn function_handler(
    shim: &TransportShim,
    event: LambdaEvent<Request>,
) -> Result<Response, Error> {
    let payload = event.payload;
    // 沒有路徑時改用部署時指定的函式
    let route = payload.path.as_deref().and_then(Route::from_path).or_else(|| {
        std::env::var("DE_ANALYZER_FUNCTION")
            .ok()
            .as_deref()
            .and_then(Route::from_path)
    });

    tracing::info!(
        "Incoming {} request to {:?} (route: {:?})",
        payload.http_method,
        payload.path,
        route
    );

    let request = FunctionRequest {
        method: payload.http_method,
        body: payload.body,
    };

    let response = match route {
        Some(Route::Linearity) => shim.check_linearity(&request).await,
        Some(Route::Verify) => shim.verify_solution(&request).await,
        None => FunctionResponse::json(404, &CheckPayload::error("Not Found")),
    };

    tracing::info!("Responding with status {}", response.status_code);
    Ok(response.into())
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let lambda_config = LambdaConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    lambda_config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let shim = Arc::new(TransportShim::new(build_collaborator(&lambda_config)));
    tracing::info!("Starting analyzer function with {} collaborator", shim.collaborator_name());

    run(service_fn(move |event: LambdaEvent<Request>| {
        let shim = Arc::clone(&shim);
        async move { function_handler(&shim, event).await }
    }))
    .await
}
