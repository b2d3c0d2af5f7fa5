//! Text-generation providers and the plumbing around their replies.
//!
//! Features never talk to a vendor directly. They hold an
//! `Arc<dyn GenerativeClient>`, bound once at startup from [`crate::config::Config`],
//! and turn every failure into a deterministic fallback via [`Outcome`].

pub mod client;
pub mod errors;
pub mod gemini;
pub mod interpreter;
pub mod openai;
pub mod outcome;

pub use client::{
    AiProvider, DisabledClient, GenerationRequest, GenerativeClient, connect, with_timeout,
};
pub use errors::AiError;
pub use gemini::GeminiClient;
pub use interpreter::{ParseError, extract_json};
pub use openai::OpenAiClient;
pub use outcome::{FallbackReason, Outcome};
