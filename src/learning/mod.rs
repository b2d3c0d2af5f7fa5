//! Level-adapted study material built from news articles.
//!
//! Each exercise pairs a prompt builder with an interpreter that validates
//! the provider reply and a deterministic fallback of the same shape.
//! [`Tutor`] runs them against the configured generative client.

pub mod cultural;
pub mod gate;
pub mod level;
pub mod prompts;
pub mod question;
pub mod quiz;
pub mod rephrase;
pub mod summary;
pub mod topics;
pub mod tutor;
pub mod vocabulary;
pub mod writing;

pub use cultural::CulturalContext;
pub use gate::{GateConfig, Verdict, is_generic};
pub use level::Level;
pub use quiz::QuizQuestion;
pub use rephrase::RephrasedText;
pub use summary::NewsSummary;
pub use topics::Topic;
pub use tutor::{Timeouts, Tutor};
pub use writing::{ScoredAspect, WritingFeedback, WritingSubmission};
