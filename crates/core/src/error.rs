use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("reply channel rejected credentials (status {status}): {message}")]
    Unauthorized { status: u16, message: String },
    #[error("reply channel returned status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("reply channel request failed: {0}")]
    Transport(String),
}

impl DeliveryError {
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Unauthorized { status, message },
            _ => Self::Rejected { status, message },
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation backend returned status {status}: {message}")]
    Backend { status: u16, message: String },
    #[error("generation request failed: {0}")]
    Transport(String),
    #[error("generation response malformed: {0}")]
    Malformed(String),
    #[error("generation response contained no text")]
    EmptyResponse,
}
