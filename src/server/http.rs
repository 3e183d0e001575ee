// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::future::Future;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;

use crate::broadcast::HubHandle;
use crate::commands::SceneCommands;

#[derive(Debug, Clone)]
pub struct HttpState {
    pub commands: Arc<SceneCommands>,
    pub hub: HubHandle,
    /// Port viewers connect to, as actually bound.
    pub ws_port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: String,
    pub elements_count: usize,
    pub active_connections: usize,
    pub revision: u64,
    pub ws_port: u16,
    pub persistence_file: String,
}

pub fn http_router(state: HttpState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/demo", get(demo))
        .fallback(not_found)
        .with_state(state)
}

pub async fn serve_http(
    listener: TcpListener,
    state: HttpState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, http_router(state)).with_graceful_shutdown(shutdown).await
}

async fn health(State(state): State<HttpState>) -> Json<HealthReport> {
    let store = state.commands.store();
    Json(HealthReport {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
        elements_count: store.len(),
        active_connections: state.hub.connection_count(),
        revision: store.revision(),
        ws_port: state.ws_port,
        persistence_file: store.path().display().to_string(),
    })
}

async fn demo(State(state): State<HttpState>) -> Response {
    match state.commands.load_demo_scene() {
        Ok(outcome) => (StatusCode::OK, outcome.to_string()).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "demo scene failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
        }
    }
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}
