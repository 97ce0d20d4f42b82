//! HTTP endpoint for the heuristic interpreter
//!
//! `POST /api/voice/interpret` with `{"transcript": "..."}`:
//! 400 `{"error": ...}` when the transcript is missing or blank,
//! 200 `{"intent": Intent | null}` otherwise.

use crate::heuristic::Heuristic;
use crate::remote::{InterpretRequest, InterpretResponse};
use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::post;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const INTERPRET_PATH: &str = "/api/voice/interpret";

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn bad_request(message: impl Into<String>) -> Response {
    let body = ErrorResponse {
        error: message.into(),
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

pub fn router(heuristic: Arc<Heuristic>) -> Router {
    Router::new()
        .route(INTERPRET_PATH, post(handle_interpret))
        .with_state(heuristic)
}

async fn handle_interpret(
    State(heuristic): State<Arc<Heuristic>>,
    body: Result<Json<InterpretRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = body else {
        return bad_request("body must be JSON like {\"transcript\": \"...\"}");
    };
    let transcript = match request.transcript.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return bad_request("transcript is required"),
    };

    let intent = heuristic.interpret(transcript);
    match &intent {
        Some(i) => tracing::info!(transcript, "interpreted as {}", i),
        None => tracing::debug!(transcript, "no interpretation"),
    }
    Json(InterpretResponse { intent }).into_response()
}

/// Interpreter server running in a background task
pub struct InterpretServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl InterpretServer {
    /// Bind `bind` (port 0 picks a free port) and start serving
    pub async fn start(bind: &str, heuristic: Arc<Heuristic>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(bind).await?;
        let addr = listener.local_addr()?;
        tracing::info!("interpreter listening on http://{}{}", addr, INTERPRET_PATH);

        let app = router(heuristic);
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("interpreter server error: {}", e);
            }
        });
        Ok(Self { addr, handle })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn url(&self) -> String {
        format!("http://{}{}", self.addr, INTERPRET_PATH)
    }

    /// Wait for the server task (runs until aborted)
    pub async fn wait(mut self) {
        let _ = (&mut self.handle).await;
    }
}

impl Drop for InterpretServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
