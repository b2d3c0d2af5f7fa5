use thiserror::Error;

use crate::ai::errors::AiError;

/// Why a deterministic fallback was served instead of generated content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FallbackReason {
    #[error("no provider configured")]
    NotConfigured,
    #[error("provider failed: {0}")]
    Provider(String),
    #[error("provider timed out")]
    Timeout,
    #[error("reply was not JSON")]
    Unparseable,
    #[error("reply lacked usable {0}")]
    InvalidShape(&'static str),
    #[error("generated text was too generic: {0}")]
    Generic(String),
}

impl From<&AiError> for FallbackReason {
    fn from(err: &AiError) -> Self {
        match err {
            AiError::NotConfigured => Self::NotConfigured,
            AiError::Timeout(_) => Self::Timeout,
            AiError::Parse(_) => Self::Unparseable,
            other => Self::Provider(other.to_string()),
        }
    }
}

/// Generated content, or the fallback served in its place.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Generated(T),
    Fallback(T, FallbackReason),
}

impl<T> Outcome<T> {
    pub fn value(&self) -> &T {
        match self {
            Self::Generated(value) | Self::Fallback(value, _) => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Generated(value) | Self::Fallback(value, _) => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(..))
    }

    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Generated(_) => None,
            Self::Fallback(_, reason) => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Generated(value) => Outcome::Generated(f(value)),
            Self::Fallback(value, reason) => Outcome::Fallback(f(value), reason),
        }
    }
}
