//! Spawns the real router on a random port and talks to it over HTTP.

use anyhow::Result;
use de_analyzer::transport::{router, HealthResponse};
use de_analyzer::{CheckPayload, CheckStatus, HeuristicCollaborator, TransportShim};
use std::sync::Arc;
use tokio::net::TcpListener;

async fn spawn_server() -> Result<String> {
    let shim = Arc::new(TransportShim::new(Arc::new(HeuristicCollaborator::new())));
    let app = router(shim);

    // Bind to port 0 to get a random available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Ok(format!("http://{}", addr))
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let base_url = spawn_server().await?;
    let response = reqwest::get(format!("{}/health", base_url)).await?;

    assert_eq!(response.status(), 200);
    let body: HealthResponse = response.json().await?;
    assert_eq!(body.status, "healthy");
    assert_eq!(body.collaborator, "heuristic");
    assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    assert!(body.timestamp.ends_with('Z'));
    Ok(())
}

#[tokio::test]
async fn test_linearity_endpoint() -> Result<()> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/linearity", base_url))
        .form(&[("equation", "y' + y = 0")])
        .send()
        .await?;

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str()?,
        "application/json"
    );
    let payload: CheckPayload = response.json().await?;
    assert_eq!(payload.status, CheckStatus::Success);

    let response = client
        .post(format!("{}/check_linearity", base_url))
        .form(&[("equation", "y' = y^2 + x")])
        .send()
        .await?;
    let payload: CheckPayload = response.json().await?;
    assert_eq!(payload.status, CheckStatus::Error);
    Ok(())
}

#[tokio::test]
async fn test_missing_parameter_and_wrong_method() -> Result<()> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/linearity", base_url))
        .form(&[("de", "y' = y")])
        .send()
        .await?;
    assert_eq!(response.status(), 400);
    let payload: CheckPayload = response.json().await?;
    assert_eq!(payload.status, CheckStatus::Error);

    let response = client.get(format!("{}/verify", base_url)).send().await?;
    assert_eq!(response.status(), 405);
    let payload: CheckPayload = response.json().await?;
    assert_eq!(payload.message, "Method Not Allowed");
    Ok(())
}

#[tokio::test]
async fn test_verify_endpoint() -> Result<()> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/verify_solution", base_url))
        .form(&[("de", "y'' + y = 0"), ("solution", "y = A*sin(x) + B*cos(x)")])
        .send()
        .await?;
    assert_eq!(response.status(), 200);
    let payload: CheckPayload = response.json().await?;
    assert_eq!(payload.status, CheckStatus::Success);
    assert!(payload.plot_url.is_none());

    let response = client
        .post(format!("{}/verify", base_url))
        .form(&[("de", "y'' + y = 0"), ("solution", "y = e^x")])
        .send()
        .await?;
    let payload: CheckPayload = response.json().await?;
    assert_eq!(payload.status, CheckStatus::Error);
    assert!(payload.message.contains("2e^x"));
    Ok(())
}

#[tokio::test]
async fn test_unknown_path_and_health_method_answer_with_json() -> Result<()> {
    let base_url = spawn_server().await?;
    let client = reqwest::Client::new();

    let response = client.get(format!("{}/plot", base_url)).send().await?;
    assert_eq!(response.status(), 404);
    let payload: CheckPayload = response.json().await?;
    assert_eq!(payload.status, CheckStatus::Error);
    assert_eq!(payload.message, "Not Found");

    let response = client.post(format!("{}/health", base_url)).send().await?;
    assert_eq!(response.status(), 405);
    let payload: CheckPayload = response.json().await?;
    assert_eq!(payload.message, "Method Not Allowed");
    Ok(())
}
