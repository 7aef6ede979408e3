//! Slash command endpoint.
//!
//! Endpoints:
//!   GET  /   – Landing page
//!   POST /   – Slack slash command (signature verified)

use axum::{
    extract::State,
    handler::Handler,
    middleware,
    response::Html,
    routing::get,
    Form, Json, Router,
};
use chrono::Utc;

use crate::{
    middleware::verify_slack_signature,
    models::{RollAuditRecord, SlackMessage, SlashCommandPayload},
    services::{spawn_record, Evaluation},
    AppState,
};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// POST /
///
/// Always answers with a displayable message; bad input becomes an
/// ephemeral error reply. A successful roll is audited in the background.
async fn slash_command(
    State(state): State<AppState>,
    Form(payload): Form<SlashCommandPayload>,
) -> Json<SlackMessage> {
    tracing::info!(
        user_id = %payload.user_id,
        user_name = payload.user_name.as_deref().unwrap_or("unknown"),
        team_id = payload.team_id.as_deref().unwrap_or("unknown"),
        channel_id = payload.channel_id.as_deref().unwrap_or("unknown"),
        command = payload.command.as_deref().unwrap_or("unknown"),
        text = %payload.text,
        "Received slash command"
    );

    let evaluation = state.dice.evaluate(&payload.text);

    match &evaluation {
        Evaluation::Rolled { request, outcome } => {
            tracing::debug!(notation = %request, total = outcome.grand_total, "Rolled");
            let record = RollAuditRecord::new(
                payload.user_id.clone(),
                payload.team_id.clone(),
                request,
                outcome,
                Utc::now(),
            );
            spawn_record(state.audit.clone(), record);
        }
        Evaluation::Rejected(err) => {
            tracing::debug!(error = %err, "Rejected roll");
        }
        Evaluation::Help => {}
    }

    Json(state.dice.respond(&evaluation, &payload.user_id))
}

pub fn routes(state: &AppState) -> Router<AppState> {
    let signed = middleware::from_fn_with_state(state.clone(), verify_slack_signature);

    Router::new().route("/", get(index).post(slash_command.layer(signed)))
}
