pub mod command;
pub mod health;
pub mod oauth;

use axum::Router;

use crate::AppState;

/// Combine all routes
pub fn app_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(command::routes(state))
        .merge(oauth::routes())
        .merge(health::routes())
}
