//! Test helpers for building the application around a mocked mailer

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::Request,
    http::{Method, StatusCode, header},
};
use folio::{
    AppState,
    config::{Config, EmailConfig, ObservabilityConfig, ServerConfig},
};
use folio_contact::{ContactRelay, MockMailer};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const RELAY_ACCOUNT: &str = "relay@gmail.com";

/// Email configuration with SMTP credentials set
pub fn configured_email() -> EmailConfig {
    EmailConfig {
        smtp_username: Some(RELAY_ACCOUNT.to_string()),
        smtp_password: Some("app-password".to_string()),
        ..EmailConfig::default()
    }
}

pub fn create_test_config(email: EmailConfig) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3001,
        },
        email,
        observability: ObservabilityConfig::default(),
    }
}

/// Router whose relay sends through the given mock
pub fn create_test_app(mailer: MockMailer, email: EmailConfig) -> Router {
    let config = create_test_config(email);
    let relay = ContactRelay::new(Arc::new(mailer), config.email.relay_settings());

    folio::routes::router(AppState {
        relay: Arc::new(relay),
    })
}

/// Mock that fails the test if it is ever called
pub fn unreachable_mailer() -> MockMailer {
    let mut mailer = MockMailer::new();
    mailer.expect_send().never();
    mailer
}

pub async fn post_contact(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, serde_json::from_slice(&bytes).unwrap())
}
