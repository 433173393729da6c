//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. Both
//! collaborators sit behind traits: the conversation store so the backing can
//! be swapped, the LLM client so tests can mock the provider.

use std::sync::Arc;

use crate::llm::LlmChat;
use crate::storage::Storage;

/// Shared application state. Clone is required by Axum; both fields are
/// Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    /// Optional LLM client. `None` while the Groq API key is not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
}

impl AppState {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, llm: Option<Arc<dyn LlmChat>>) -> Self {
        Self { storage, llm }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
