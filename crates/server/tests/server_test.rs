//! # Server Endpoint Tests
//!
//! This file contains integration tests for the `adforge-server` endpoints,
//! including health checks and error handling for invalid input.

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::{generate_jwt, TestApp};

#[tokio::test]
async fn test_root_and_health_check_endpoints() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;

    // --- Test Root Endpoint ---
    let root_response = app
        .client
        .get(format!("{}/", app.address))
        .send()
        .await
        .expect("Failed to execute request to /");

    // Assert
    assert!(root_response.status().is_success());
    assert_eq!(
        "adforge server is running.",
        root_response.text().await.unwrap()
    );

    // --- Test Health Check Endpoint ---
    let health_response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request to /health");

    // Assert
    assert!(health_response.status().is_success());
    assert_eq!("OK", health_response.text().await.unwrap());

    Ok(())
}

#[tokio::test]
async fn test_generate_campaign_malformed_json_body() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let token = generate_jwt("brand@example.com", "brand")?;
    // This JSON is syntactically invalid (missing closing brace).
    let malformed_body = r#"{"campaignType": "amplify""#;

    // Act
    let response = app
        .client
        .post(format!("{}/api/ai/generateCampaign", app.address))
        .bearer_auth(token)
        .header("Content-Type", "application/json")
        .body(malformed_body)
        .send()
        .await?;

    // Assert: the body never reaches the pipeline.
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
