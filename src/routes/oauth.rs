//! Slack app installation.
//!
//! Endpoints:
//!   GET /install – Redirect to Slack's authorize page
//!   GET /oauth   – OAuth 2.0 callback

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    services::{slack_oauth_service::InstalledWorkspace, SlackOAuthService},
    AppState,
};

/// Slack OAuth callback query parameters.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

fn oauth_service(state: &AppState) -> AppResult<Arc<SlackOAuthService>> {
    state.oauth.clone().ok_or_else(|| {
        AppError::Configuration(
            "SLACK_CLIENT_ID and SLACK_CLIENT_SECRET must be set for installation".to_string(),
        )
    })
}

fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// GET /install
async fn install(State(state): State<AppState>) -> AppResult<Response> {
    let service = oauth_service(&state)?;
    let oauth_state = service.issue_state(Utc::now().timestamp())?;
    Ok(found(&service.authorize_url(&oauth_state)))
}

/// GET /oauth
///
/// Slack redirects here with a temporary `code` after the user approves the
/// app. The `state` issued by `/install` must come back intact and unexpired
/// before Slack is contacted. The code is exchanged for a token, `auth.test`
/// resolves the workspace, and the user is sent back to their Slack workspace.
async fn oauth_callback(
    State(state): State<AppState>,
    Query(params): Query<OAuthCallbackParams>,
) -> AppResult<Response> {
    if let Some(error) = params.error {
        return Err(AppError::ExternalService(format!(
            "Slack OAuth error: {error}"
        )));
    }

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| {
            AppError::Validation("Missing 'code' parameter from Slack OAuth callback".to_string())
        })?;

    let service = oauth_service(&state)?;
    if let Err(e) = service.validate_state(params.state.as_deref(), Utc::now().timestamp()) {
        tracing::warn!(error = %e, "Rejected OAuth callback");
        return Err(e);
    }

    let workspace = service.complete_install(&code).await?;

    tracing::info!(
        team_id = workspace.team_id.as_deref().unwrap_or("unknown"),
        team = workspace.team_name.as_deref().unwrap_or("unknown"),
        "Slack app installed"
    );

    Ok(match workspace.url.as_deref() {
        Some(url) => found(url),
        None => Html(confirmation_page(&workspace)).into_response(),
    })
}

fn confirmation_page(workspace: &InstalledWorkspace) -> String {
    let team = workspace
        .team_name
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| "your workspace".to_string());
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Dice Roll installed</title></head>\
         <body><h1>Dice Roll is installed</h1><p>Type <code>/roll</code> in {team} to get started.</p></body></html>"
    )
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/install", get(install))
        .route("/oauth", get(oauth_callback))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oauth_callback_params_deserialise_with_error() {
        let json = r#"{"error": "access_denied"}"#;
        let params: OAuthCallbackParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.error.as_deref(), Some("access_denied"));
        assert!(params.code.is_none());
    }

    #[test]
    fn test_oauth_callback_params_deserialise_with_code() {
        let json = r#"{"code": "abc123", "state": "random_state"}"#;
        let params: OAuthCallbackParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.code.as_deref(), Some("abc123"));
        assert_eq!(params.state.as_deref(), Some("random_state"));
    }

    #[test]
    fn test_found_sets_location() {
        let response = found("https://acme.slack.com/");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "https://acme.slack.com/");
    }

    #[test]
    fn test_confirmation_page_escapes_team_name() {
        let page = confirmation_page(&InstalledWorkspace {
            team_id: Some("T1".into()),
            team_name: Some("<Acme>".into()),
            url: None,
        });
        assert!(page.contains("&lt;Acme&gt;"));
        assert!(!page.contains("<Acme>"));
    }

    #[test]
    fn test_confirmation_page_without_team() {
        let page = confirmation_page(&InstalledWorkspace {
            team_id: None,
            team_name: None,
            url: None,
        });
        assert!(page.contains("your workspace"));
    }
}
