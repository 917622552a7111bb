mod channel;
mod composer;
mod dispatcher;
mod gemini;
mod generation;
mod line;
#[cfg(test)]
mod test_support;

pub use channel::{GenerationBackend, ReplyChannel};
pub use composer::ResponseComposer;
pub use dispatcher::{DispatchOutcome, EventDispatcher};
pub use gemini::{GeminiBackend, DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODEL};
pub use generation::{GenerationClient, SYSTEM_INSTRUCTION};
pub use line::{
    LineEvent, LineMessage, LineReplyClient, LineSource, LineWebhookBody, DEFAULT_LINE_API_BASE,
};
