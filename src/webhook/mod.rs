//! Webhook endpoint: signature check, event dispatch, reply delivery.

mod events;
mod signature;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;

use crate::config::Config;
use crate::format::{FALLBACK_MESSAGE, format_answer};
use crate::line;
use crate::llm;

use events::{Event, Message, WebhookPayload};

/// Hard cap on one event's LLM round trip plus reply delivery.
const EVENT_TIMEOUT: Duration = Duration::from_secs(90);

pub struct AppState {
    pub config: Config,
    pub line: line::Client,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/callback", post(callback))
        .with_state(state)
}

/// `POST /callback`: verify the signature, acknowledge immediately, and
/// process each event in its own task so slow LLM calls never hold the
/// webhook open (the platform retries non-2xx deliveries).
async fn callback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let signature = headers
        .get("x-line-signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !signature::verify(&state.config.line_channel_secret, &body, signature) {
        log::error!("Invalid signature on webhook callback");
        return (StatusCode::BAD_REQUEST, "invalid signature");
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            log::error!("Malformed webhook payload: {}", e);
            return (StatusCode::BAD_REQUEST, "malformed payload");
        }
    };

    log::debug!(
        "Webhook verified: {} event(s), body length {}",
        payload.events.len(),
        body.len()
    );

    for event in payload.events {
        let state = state.clone();
        tokio::spawn(async move {
            if tokio::time::timeout(EVENT_TIMEOUT, handle_event(&state, event))
                .await
                .is_err()
            {
                log::error!("Event processing timed out after {:?}", EVENT_TIMEOUT);
            }
        });
    }

    (StatusCode::OK, "OK")
}

async fn handle_event(state: &AppState, event: Event) {
    let Event::Message {
        reply_token,
        message,
        source,
    } = event
    else {
        log::debug!("Ignoring non-message event");
        return;
    };

    let user_id = source
        .and_then(|s| s.user_id)
        .unwrap_or_else(|| "unknown".to_string());

    let answer = match message {
        Message::Text { text } => {
            log::info!("Received text message from user {}", user_id);
            llm::generate_answer(&state.config, &text).await
        }
        Message::Image { id } => {
            log::info!("Received image message from user {}", user_id);
            match state.line.message_content(&id).await {
                Ok(bytes) => llm::answer_from_image(&state.config, &bytes).await,
                Err(e) => {
                    log::error!("Failed to fetch image content for user {}: {}", user_id, e);
                    String::new()
                }
            }
        }
        Message::Other => {
            log::debug!("Ignoring unsupported message kind from user {}", user_id);
            return;
        }
    };

    let reply = format_answer(&answer);
    log::debug!("Reply for user {} is {} chars", user_id, reply.len());

    if let Err(e) = state.line.reply(&reply_token, &reply).await {
        log::error!("Failed to send reply to user {}: {}", user_id, e);
        // Best effort: at least tell the user something went wrong.
        if let Err(e) = state.line.reply(&reply_token, FALLBACK_MESSAGE).await {
            log::error!("Failed to send fallback message to user {}: {}", user_id, e);
        }
    } else {
        log::info!("Sent solution to user {}", user_id);
    }
}
