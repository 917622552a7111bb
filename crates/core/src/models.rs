use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::templates::GENERATION_APOLOGY_TEXT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    ViewPackages,
    StartClaim,
    Greeting,
    Fallback,
}

impl Intent {
    pub fn as_code(self) -> &'static str {
        match self {
            Self::ViewPackages => "view_packages",
            Self::StartClaim => "start_claim",
            Self::Greeting => "greeting",
            Self::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Message,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub kind: EventKind,
    pub message_kind: MessageKind,
    pub sender_id: Option<String>,
    pub reply_token: Option<String>,
    pub text: String,
}

impl InboundEvent {
    pub fn text_message(
        sender_id: impl Into<String>,
        reply_token: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            kind: EventKind::Message,
            message_kind: MessageKind::Text,
            sender_id: Some(sender_id.into()),
            reply_token: Some(reply_token.into()),
            text: text.into(),
        }
    }

    pub fn is_text_message(&self) -> bool {
        self.kind == EventKind::Message && self.message_kind == MessageKind::Text
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Message { label: String, text: String },
    Uri { label: String, uri: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickReplyOption {
    pub label: &'static str,
    pub trigger_text: &'static str,
}

impl QuickReplyOption {
    pub const fn new(label: &'static str, trigger_text: &'static str) -> Self {
        Self {
            label,
            trigger_text,
        }
    }

    pub fn to_action(&self) -> Action {
        Action::Message {
            label: self.label.to_string(),
            text: self.trigger_text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReplyItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReply {
    pub items: Vec<QuickReplyItem>,
}

impl QuickReply {
    pub fn from_options(options: &[QuickReplyOption]) -> Self {
        Self {
            items: options
                .iter()
                .map(|option| QuickReplyItem {
                    item_type: "action".to_string(),
                    action: option.to_action(),
                })
                .collect(),
        }
    }

    pub fn trigger_texts(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match &item.action {
                Action::Message { text, .. } => Some(text.as_str()),
                Action::Uri { .. } => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    Text {
        text: String,
        #[serde(rename = "quickReply", default)]
        #[serde(skip_serializing_if = "Option::is_none")]
        quick_reply: Option<QuickReply>,
    },
    Flex {
        #[serde(rename = "altText")]
        alt_text: String,
        contents: Value,
    },
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            quick_reply: None,
        }
    }

    pub fn text_with_quick_reply(text: impl Into<String>, options: &[QuickReplyOption]) -> Self {
        Self::Text {
            text: text.into(),
            quick_reply: Some(QuickReply::from_options(options)),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Flex { .. } => "flex",
        }
    }

    pub fn quick_reply(&self) -> Option<&QuickReply> {
        match self {
            Self::Text { quick_reply, .. } => quick_reply.as_ref(),
            Self::Flex { .. } => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text.as_str()),
            Self::Flex { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_instruction: String,
}

// Unavailable renders as the fixed apology text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Generated(String),
    Unavailable,
}

impl GenerationOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Generated(text) => text,
            Self::Unavailable => GENERATION_APOLOGY_TEXT.to_string(),
        }
    }
}
