//! LLM relay client for the Groq completion API.
//!
//! DESIGN
//! ======
//! Configuration comes from environment variables; the concrete `GroqClient`
//! speaks the OpenAI-compatible `/chat/completions` endpoint over `reqwest`.
//! The provider-neutral `LlmChat` trait is the seam that lets tests inject a
//! mock instead of a live provider.

pub mod config;
pub mod groq;
pub mod types;

pub use groq::GroqClient;
pub use types::LlmChat;
