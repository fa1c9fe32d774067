use std::future::Future;

use axum::Router;
use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{FromRequestParts, Request, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;

use crate::state::AppState;

use super::session;

pub const HEALTH_TEXT: &str = "Backend server is running.";

pub fn router(state: AppState) -> Router {
    Router::new().route("/", get(root)).with_state(state)
}

/// WebSocket upgrades and the plain health check share `/`.
async fn root(State(state): State<AppState>, request: Request) -> Response {
    let (mut parts, _body) = request.into_parts();
    match WebSocketUpgrade::from_request_parts(&mut parts, &state).await {
        Ok(upgrade) => upgrade
            .on_upgrade(move |socket| session::run(socket, state))
            .into_response(),
        Err(_) => HEALTH_TEXT.into_response(),
    }
}

/// Serves until `shutdown` resolves, then clears the registry.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("Server listening on http://{addr}");
    }
    let result = axum::serve(listener, router(state.clone()))
        .with_graceful_shutdown(shutdown)
        .await;
    state.shutdown().await;
    result
}
