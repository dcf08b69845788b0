//! HTTP surface: Meta webhook verification, webhook deliveries, health check.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};
use whatsapp::{is_status_update, is_valid_whatsapp_message};

use crate::handler::WebhookHandler;

#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<WebhookHandler>,
    /// Expected `hub.verify_token`; `None` refuses every verification attempt.
    pub verify_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl StatusResponse {
    fn ok() -> Self {
        Self {
            status: "ok",
            message: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: Some(message.into()),
        }
    }
}

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Forbidden(String),
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        (status, Json(StatusResponse::error(message))).into_response()
    }
}

/// Create the webhook router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", get(verify_webhook).post(receive_webhook))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Subscription handshake: echo `hub.challenge` when mode is `subscribe` and the token matches.
async fn verify_webhook(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<String, AppError> {
    let (Some(mode), Some(token)) = (params.get("hub.mode"), params.get("hub.verify_token"))
    else {
        info!("MISSING_PARAMETER");
        return Err(AppError::BadRequest("Missing parameters".to_string()));
    };

    let token_matches = state.verify_token.as_deref() == Some(token.as_str());
    if mode == "subscribe" && token_matches {
        info!("WEBHOOK_VERIFIED");
        Ok(params.get("hub.challenge").cloned().unwrap_or_default())
    } else {
        info!(mode = %mode, "VERIFICATION_FAILED");
        Err(AppError::Forbidden("Verification failed".to_string()))
    }
}

/// Webhook delivery. Text messages are answered before the 200 is returned; turn failures are
/// logged and still acknowledged so the platform does not redeliver.
async fn receive_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<StatusResponse>), AppError> {
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "Failed to decode JSON");
        AppError::BadRequest("Invalid JSON provided".to_string())
    })?;

    if is_status_update(&payload) {
        info!("Received a WhatsApp status update");
        return Ok((StatusCode::OK, Json(StatusResponse::ok())));
    }

    if !is_valid_whatsapp_message(&payload) {
        warn!("Not a WhatsApp API event");
        return Err(AppError::NotFound("Not a WhatsApp API event".to_string()));
    }

    if let Err(e) = state.handler.process(&payload).await {
        error!(error = %e, "Failed to process WhatsApp message");
    }
    Ok((StatusCode::OK, Json(StatusResponse::ok())))
}
