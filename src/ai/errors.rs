use std::time::Duration;
use thiserror::Error;

use crate::ai::interpreter::ParseError;

#[derive(Debug, Error)]
pub enum AiError {
    /// No provider key was configured.
    #[error("no generative provider configured")]
    NotConfigured,

    #[error("network error: {0}")]
    Network(String),

    #[error("provider returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("model not available: {0}")]
    ModelNotFound(String),

    #[error("provider reply contained no text")]
    EmptyReply,

    #[error("provider response could not be decoded: {0}")]
    Decode(String),

    #[error("no reply within {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl AiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
