//! Chat-completion client for the hosted language model
//!
//! Speaks the OpenAI-compatible `/chat/completions` protocol, which is what
//! Groq exposes.

mod client;
mod types;

pub use client::{ChatCompletion, ChatError, GroqClient};
pub use types::*;
