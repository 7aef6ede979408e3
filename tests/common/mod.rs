//! Shared helpers for integration tests.
//!
//! This module provides:
//! - `TestApp` – the real router built from a test `Config`, driven with
//!   `oneshot` instead of a TCP listener
//! - Config builders for each deployment mode
//! - Slack request signing

use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use dice_roll::{
    build_router,
    config::{Config, DeploymentMode},
    services::{
        slack_signature_service::sign, AuditSink, NoopAuditSink, RandomSource, SeededRandom,
    },
    AppState,
};
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

#[allow(dead_code)]
pub const SIGNING_SECRET: &str = "test-signing-secret";

/// Raw response pieces.
#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

#[allow(dead_code)]
impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

/// Minimal test application wrapper.
#[allow(dead_code)]
pub struct TestApp {
    router: Router,
}

#[allow(dead_code)]
impl TestApp {
    /// Create a `TestApp` from any `Router`.
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Build the real router with a no-op audit sink.
    pub fn with_config(config: Config) -> Self {
        Self::with_random(config, Arc::new(SeededRandom::new(2024)))
    }

    pub fn with_random(config: Config, random: Arc<dyn RandomSource>) -> Self {
        let state = AppState::new(config, Arc::new(NoopAuditSink), random);
        Self::new(build_router(state))
    }

    /// Build the real router around a caller-supplied audit sink.
    pub fn with_audit(config: Config, audit: Arc<dyn AuditSink>) -> Self {
        let state = AppState::new(config, audit, Arc::new(SeededRandom::new(2024)));
        Self::new(build_router(state))
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Send a GET request.
    pub async fn get(&self, path: &str) -> TestResponse {
        let req = Request::builder()
            .uri(path)
            .method("GET")
            .body(Body::empty())
            .unwrap();
        self.send(req).await
    }

    /// Send an unsigned form POST.
    pub async fn post_form(&self, path: &str, body: &str) -> TestResponse {
        self.post_form_with_headers(path, body, &[]).await
    }

    pub async fn post_form_with_headers(
        &self,
        path: &str,
        body: &str,
        headers: &[(&str, String)],
    ) -> TestResponse {
        let mut builder = Request::builder()
            .uri(path)
            .method("POST")
            .header("Content-Type", "application/x-www-form-urlencoded");
        for (name, value) in headers {
            builder = builder.header(*name, value.as_str());
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// POST a slash command signed the way Slack signs it.
    pub async fn post_signed(&self, path: &str, body: &str, secret: &str) -> TestResponse {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(secret, &timestamp, body.as_bytes());
        self.post_form_with_headers(
            path,
            body,
            &[
                ("X-Slack-Request-Timestamp", timestamp),
                ("X-Slack-Signature", signature),
            ],
        )
        .await
    }
}

#[allow(dead_code)]
pub fn development_config() -> Config {
    Config {
        deployment_mode: DeploymentMode::Development,
        ..Config::default()
    }
}

#[allow(dead_code)]
pub fn signed_config(mode: DeploymentMode) -> Config {
    Config {
        deployment_mode: mode,
        slack_signing_secret: Some(SecretString::from(SIGNING_SECRET)),
        ..Config::default()
    }
}

/// `text=...&user_id=...` form body.
#[allow(dead_code)]
pub fn command_body(text: &str, user_id: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("text", text)
        .append_pair("user_id", user_id)
        .finish()
}
