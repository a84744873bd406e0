//! Post summarization via an OpenAI-compatible chat-completion endpoint.
//!
//! Builds a single-turn prompt from the collected posts (bounded by a
//! character budget), requests a short completion, and derives a coarse
//! sentiment label by substring-matching the model's free-text answer. The
//! substring heuristic is a deliberate behavioral contract — the report's
//! sentiment labels are defined by it, not by any real sentiment model.

mod client;
mod error;
mod prompt;
mod sentiment;

pub use client::LlmClient;
pub use error::SummarizeError;
pub use prompt::build_prompt;
pub use sentiment::sentiment_of;
