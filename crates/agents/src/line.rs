use insure_core::{DeliveryError, EventKind, InboundEvent, MessageKind, OutboundMessage};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::channel::ReplyChannel;

pub const DEFAULT_LINE_API_BASE: &str = "https://api.line.me";

#[derive(Debug, Clone, Deserialize)]
pub struct LineWebhookBody {
    #[serde(default)]
    pub events: Vec<LineEvent>,
}

impl LineWebhookBody {
    pub fn into_inbound_events(self) -> Vec<InboundEvent> {
        self.events.into_iter().map(InboundEvent::from).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(rename = "replyToken", default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub source: Option<LineSource>,
    #[serde(default)]
    pub message: Option<LineMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineSource {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl From<LineEvent> for InboundEvent {
    fn from(event: LineEvent) -> Self {
        let kind = match event.event_type.as_str() {
            "message" => EventKind::Message,
            _ => EventKind::Other,
        };
        let (message_kind, text) = match event.message {
            Some(message) if message.message_type == "text" => {
                (MessageKind::Text, message.text.unwrap_or_default())
            }
            _ => (MessageKind::Other, String::new()),
        };

        InboundEvent {
            kind,
            message_kind,
            sender_id: event.source.and_then(|source| source.user_id),
            reply_token: event.reply_token,
            text,
        }
    }
}

#[derive(Debug, Serialize)]
struct ReplyRequest<'a> {
    #[serde(rename = "replyToken")]
    reply_token: &'a str,
    messages: &'a [OutboundMessage],
}

#[derive(Debug, Deserialize)]
struct LineErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LineReplyClient {
    http_client: Client,
    channel_access_token: String,
    api_base: String,
}

impl LineReplyClient {
    pub fn new(http_client: Client, channel_access_token: impl Into<String>) -> Self {
        Self {
            http_client,
            channel_access_token: channel_access_token.into(),
            api_base: DEFAULT_LINE_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn reply_url(&self) -> String {
        format!("{}/v2/bot/message/reply", self.api_base)
    }
}

impl ReplyChannel for LineReplyClient {
    async fn send(
        &self,
        reply_token: &str,
        messages: &[OutboundMessage],
    ) -> Result<(), DeliveryError> {
        let response = self
            .http_client
            .post(self.reply_url())
            .bearer_auth(self.channel_access_token.as_str())
            .json(&ReplyRequest {
                reply_token,
                messages,
            })
            .send()
            .await
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(DeliveryError::from_status(
            status.as_u16(),
            line_error_message(&body),
        ))
    }
}

fn line_error_message(body: &str) -> String {
    serde_json::from_str::<LineErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .unwrap_or_else(|| body.to_string())
}
