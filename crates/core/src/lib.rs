pub mod error;
pub mod intent;
pub mod models;
pub mod replies;
pub mod templates;

pub use error::{DeliveryError, GenerationError};
pub use intent::{classify_intent, normalize_text, INTENT_RULES};
pub use models::*;
pub use replies::{compose_static_reply, generated_reply};
