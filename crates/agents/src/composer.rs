use insure_core::{compose_static_reply, generated_reply, Intent, OutboundMessage};

use crate::channel::GenerationBackend;
use crate::generation::GenerationClient;

pub struct ResponseComposer<B> {
    generation: GenerationClient<B>,
}

impl<B> ResponseComposer<B>
where
    B: GenerationBackend,
{
    pub fn new(generation: GenerationClient<B>) -> Self {
        Self { generation }
    }

    pub fn generation(&self) -> &GenerationClient<B> {
        &self.generation
    }

    pub async fn compose(&self, intent: Intent, text: &str) -> Vec<OutboundMessage> {
        if let Some(reply) = compose_static_reply(intent) {
            return reply;
        }

        let outcome = self.generation.generate(text).await;
        generated_reply(outcome)
    }
}
