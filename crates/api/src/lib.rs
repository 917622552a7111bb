pub mod config;
pub mod signature;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use insure_agents::{
    EventDispatcher, GeminiBackend, GenerationBackend, GenerationClient, LineReplyClient,
    LineWebhookBody, ReplyChannel, ResponseComposer,
};
use insure_observability::{AppMetrics, MetricsSnapshot};
use reqwest::Client;
use serde::Serialize;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use crate::config::AppConfig;
use crate::signature::{verify_line_signature, LINE_SIGNATURE_HEADER};

const MAX_WEBHOOK_BODY_BYTES: usize = 256 * 1024;

pub struct ApiState<C, B> {
    pub dispatcher: Arc<EventDispatcher<C, B>>,
    pub metrics: Arc<AppMetrics>,
    pub channel_secret: Arc<str>,
}

impl<C, B> Clone for ApiState<C, B> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            metrics: self.metrics.clone(),
            channel_secret: self.channel_secret.clone(),
        }
    }
}

impl<C, B> ApiState<C, B>
where
    C: ReplyChannel,
    B: GenerationBackend,
{
    pub fn new(channel: C, backend: B, channel_secret: &str, metrics: Arc<AppMetrics>) -> Self {
        let composer = ResponseComposer::new(GenerationClient::new(backend, metrics.clone()));
        Self {
            dispatcher: Arc::new(EventDispatcher::new(channel, composer, metrics.clone())),
            metrics,
            channel_secret: Arc::from(channel_secret),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: MetricsSnapshot,
}

pub fn build_app(config: &AppConfig) -> Result<Router> {
    let metrics = AppMetrics::shared();
    let http_client = Client::builder()
        .connect_timeout(std::time::Duration::from_secs(6))
        .timeout(config.http_timeout)
        .build()
        .context("failed to build HTTP client")?;

    let channel = LineReplyClient::new(http_client.clone(), config.line_channel_token.as_str())
        .with_api_base(config.line_api_base.as_str());
    let backend = GeminiBackend::new(http_client, config.gemini_api_key.as_str())
        .with_model(config.gemini_model.as_str())
        .with_api_base(config.gemini_api_base.as_str());

    let state = ApiState::new(channel, backend, &config.line_channel_secret, metrics);
    Ok(build_router(state))
}

pub fn build_router<C, B>(state: ApiState<C, B>) -> Router
where
    C: ReplyChannel + 'static,
    B: GenerationBackend + 'static,
{
    Router::new()
        .route("/health", get(health::<C, B>))
        .route("/webhook", post(webhook::<C, B>))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(MAX_WEBHOOK_BODY_BYTES))
        .with_state(state)
}

async fn health<C, B>(State(state): State<ApiState<C, B>>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn webhook<C, B>(
    State(state): State<ApiState<C, B>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    C: ReplyChannel + 'static,
    B: GenerationBackend + 'static,
{
    let signature = headers
        .get(LINE_SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if !verify_line_signature(signature, &body, &state.channel_secret) {
        warn!(
            has_signature = !signature.is_empty(),
            "webhook signature validation failed"
        );
        return rejection(StatusCode::UNAUTHORIZED, "invalid_signature");
    }

    let payload: LineWebhookBody = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "webhook body is not a valid LINE payload");
            return rejection(StatusCode::BAD_REQUEST, "invalid_payload");
        }
    };

    let events = payload.into_inbound_events();
    info!(events = events.len(), "webhook received");
    let outcomes = state.dispatcher.clone().handle_batch(events).await;

    (StatusCode::OK, Json(outcomes)).into_response()
}

fn rejection(status: StatusCode, error: &'static str) -> Response {
    let body = Json(serde_json::json!({ "error": error }));
    (status, body).into_response()
}
