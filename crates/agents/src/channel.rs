use std::future::Future;

use insure_core::{DeliveryError, GenerationError, GenerationRequest, OutboundMessage};

// Outbound delivery keyed by the one-time reply token of an inbound event.
pub trait ReplyChannel: Send + Sync {
    fn send(
        &self,
        reply_token: &str,
        messages: &[OutboundMessage],
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

pub trait GenerationBackend: Send + Sync {
    fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}
