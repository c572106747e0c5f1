use crate::domain::model::CheckPayload;
use crate::transport::shim::{FunctionRequest, FunctionResponse, TransportShim};
use crate::utils::error::{AnalyzerError, Result};
use crate::utils::monitor::RequestStats;
use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub collaborator: String,
    pub timestamp: String,
}

/// Builds the application router with its own request counters.
pub fn router(shim: Arc<TransportShim>) -> Router {
    router_with_stats(shim, Arc::new(RequestStats::new()))
}

/// Builds the application router, recording every request into `stats`.
///
/// The check routes accept any method so the shim, not axum, answers a
/// non-POST request with its JSON 405 body.
pub fn router_with_stats(shim: Arc<TransportShim>, stats: Arc<RequestStats>) -> Router {
    Router::new()
        .route("/linearity", any(check_linearity))
        .route("/check_linearity", any(check_linearity))
        .route("/verify", any(verify_solution))
        .route("/verify_solution", any(verify_solution))
        .route("/health", get(health).fallback(method_not_allowed))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(stats, log_requests))
        .with_state(shim)
}

/// Serves `app` until Ctrl-C.
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("🛑 Shutdown signal received");
}

async fn check_linearity(
    State(shim): State<Arc<TransportShim>>,
    method: Method,
    body: Bytes,
) -> Response {
    let request = function_request(&method, &body);
    into_http(shim.check_linearity(&request).await)
}

async fn verify_solution(
    State(shim): State<Arc<TransportShim>>,
    method: Method,
    body: Bytes,
) -> Response {
    let request = function_request(&method, &body);
    into_http(shim.verify_solution(&request).await)
}

async fn health(State(shim): State<Arc<TransportShim>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        collaborator: shim.collaborator_name().to_string(),
        timestamp: chrono::Utc::now()
            .format("%Y-%m-%dT%H:%M:%S%.6fZ")
            .to_string(),
    })
}

async fn method_not_allowed(method: Method) -> Response {
    into_http(FunctionResponse::from_error(&AnalyzerError::MethodNotAllowed {
        method: method.to_string(),
    }))
}

async fn not_found() -> Response {
    into_http(FunctionResponse::json(404, &CheckPayload::error("Not Found")))
}

fn function_request(method: &Method, body: &Bytes) -> FunctionRequest {
    FunctionRequest {
        method: method.as_str().to_string(),
        body: Some(String::from_utf8_lossy(body).into_owned()),
    }
}

fn into_http(response: FunctionResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut headers = HeaderMap::new();
    for (name, value) in &response.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => tracing::warn!("Dropping invalid response header {}: {}", name, value),
        }
    }

    (status, headers, response.body).into_response()
}

/// Logs every request on the way in and its status and latency on the way out.
async fn log_requests(
    State(stats): State<Arc<RequestStats>>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    tracing::info!("Incoming {} request to {}", method, path);

    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed = started.elapsed();
    let status = response.status().as_u16();
    stats.record(status, elapsed);

    tracing::info!(
        "{} {} -> {} in {:.3}s",
        method,
        path,
        status,
        elapsed.as_secs_f64()
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::HeuristicCollaborator;

    async fn spawn(stats: Arc<RequestStats>) -> String {
        let shim = Arc::new(TransportShim::new(Arc::new(HeuristicCollaborator::new())));
        let app = router_with_stats(shim, stats);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_requests_are_counted() {
        let stats = Arc::new(RequestStats::new());
        let base_url = spawn(Arc::clone(&stats)).await;
        let client = reqwest::Client::new();

        let ok = client
            .post(format!("{}/linearity", base_url))
            .form(&[("equation", "y' + y = 0")])
            .send()
            .await
            .unwrap();
        assert_eq!(ok.status(), 200);

        let missing = client
            .post(format!("{}/verify", base_url))
            .form(&[("de", "y' + y = 0")])
            .send()
            .await
            .unwrap();
        assert_eq!(missing.status(), 400);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.requests, 2);
        assert_eq!(snapshot.errors, 0);
        assert_eq!(snapshot.error_rate, 0.0);
    }
}
