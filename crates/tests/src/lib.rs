use std::time::Duration;

use insure_agents::{GenerationBackend, ReplyChannel};
use insure_core::{DeliveryError, GenerationError, GenerationRequest, OutboundMessage};
use parking_lot::Mutex;

#[derive(Default)]
pub struct RecordingChannel {
    pub sent: Mutex<Vec<(String, Vec<OutboundMessage>)>>,
    // Answered with a 401, as LINE does for a revoked channel token.
    pub unauthorized_tokens: Vec<&'static str>,
}

impl ReplyChannel for RecordingChannel {
    async fn send(
        &self,
        reply_token: &str,
        messages: &[OutboundMessage],
    ) -> Result<(), DeliveryError> {
        if self.unauthorized_tokens.contains(&reply_token) {
            let message = "Authentication failed. Confirm the channel access token.";
            return Err(DeliveryError::from_status(401, message));
        }
        self.sent
            .lock()
            .push((reply_token.to_string(), messages.to_vec()));
        Ok(())
    }
}

pub struct ScriptedBackend {
    pub answer: Option<&'static str>,
    pub delay: Option<Duration>,
}

impl ScriptedBackend {
    pub fn new(answer: Option<&'static str>) -> Self {
        Self {
            answer,
            delay: None,
        }
    }
}

impl GenerationBackend for ScriptedBackend {
    async fn generate_content(
        &self,
        _request: &GenerationRequest,
    ) -> Result<String, GenerationError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let answer = self.answer.map(str::to_string);
        answer.ok_or(GenerationError::EmptyResponse)
    }
}
