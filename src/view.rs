//! View-routing heuristic for the split-screen portfolio UI.
//!
//! DESIGN
//! ======
//! Pure substring matching against lower-cased chat text. The input side
//! fires the moment the visitor sends a message; the reply side fires on the
//! assistant text once it arrives, so a single exchange can switch the panel
//! twice (or not at all when nothing matches). This is presentation glue,
//! not intent parsing: a reply that merely mentions "contact" switches the
//! panel.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Milliseconds the typewriter animation spends per character.
pub const TYPEWRITER_MS_PER_CHAR: u64 = 30;

/// Fixed delay before a reply-triggered view switch.
pub const VIEW_SWITCH_DELAY_MS: u64 = 1000;

/// The six static panels of the left-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    Photo,
    Projects,
    Resume,
    Skills,
    Certificates,
    Contact,
}

/// Immediate view hint from the visitor's outgoing text. First match wins.
#[must_use]
pub fn route_for_input(input: &str) -> Option<ViewType> {
    let text = input.to_lowercase();
    if text.contains("project") {
        Some(ViewType::Projects)
    } else if text.contains("resume") {
        Some(ViewType::Resume)
    } else if text.contains("skill") {
        Some(ViewType::Skills)
    } else if text.contains("certificate") || text.contains("cert") {
        Some(ViewType::Certificates)
    } else if text.contains("contact") || text.contains("hire") || text.contains("reach out") {
        Some(ViewType::Contact)
    } else if text.contains("profile") || text.contains("about") {
        Some(ViewType::Photo)
    } else {
        None
    }
}

/// Delayed view hint from the assistant's reply text. Matches the phrase
/// sets the assistant is prompted to use when it offers a section.
#[must_use]
pub fn route_for_reply(reply: &str) -> Option<ViewType> {
    let text = reply.to_lowercase();
    if text.contains("show you his featured projects") || text.contains("his projects") {
        Some(ViewType::Projects)
    } else if text.contains("here's his resume") || text.contains("resume for your review") {
        Some(ViewType::Resume)
    } else if text.contains("technical skills") || text.contains("expertise levels") {
        Some(ViewType::Skills)
    } else if text.contains("certifications") || text.contains("achievements") {
        Some(ViewType::Certificates)
    } else if text.contains("contact") || text.contains("get in touch") {
        Some(ViewType::Contact)
    } else if text.contains("profile section") || text.contains("about me") {
        Some(ViewType::Photo)
    } else {
        None
    }
}

/// How long the typewriter animation runs for a reply, so the view switch can
/// wait for it to finish.
#[must_use]
pub fn typewriter_duration(text: &str) -> Duration {
    let chars = u64::try_from(text.chars().count()).unwrap_or(u64::MAX);
    Duration::from_millis(chars.saturating_mul(TYPEWRITER_MS_PER_CHAR))
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
