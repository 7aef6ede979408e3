use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    config::DeploymentMode,
    services::slack_signature_service::{SIGNATURE_HEADER, TIMESTAMP_HEADER},
    AppState,
};

/// Slash command bodies are a few hundred bytes.
pub const MAX_COMMAND_BODY_BYTES: usize = 64 * 1024;

const REJECTION_TEXT: &str = "Slack signature verification failed";

/// Verify `X-Slack-Signature` before the command handler sees the body.
///
/// The body is buffered, checked, then handed on unchanged.
pub async fn verify_slack_signature(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();

    let bytes = match axum::body::to_bytes(body, MAX_COMMAND_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Could not read slash command body");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    let now = chrono::Utc::now().timestamp();
    let result = state.verifier.verify(
        header_str(&parts.headers, TIMESTAMP_HEADER),
        header_str(&parts.headers, SIGNATURE_HEADER),
        &bytes,
        now,
    );

    if let Err(e) = result {
        tracing::warn!(error = %e, "Rejected unsigned or mis-signed Slack request");
        return rejection(state.verifier.mode());
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn rejection(mode: DeploymentMode) -> Response {
    match mode {
        DeploymentMode::Staging => (
            StatusCode::UNAUTHORIZED,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            REJECTION_TEXT,
        )
            .into_response(),
        DeploymentMode::Production | DeploymentMode::Development => {
            StatusCode::UNAUTHORIZED.into_response()
        }
    }
}
