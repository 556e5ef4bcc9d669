//! Message types for generation requests.

use crate::{Input, Role};
use serde::{Deserialize, Serialize};

/// A multimodal message in a generation request.
///
/// # Examples
///
/// ```
/// use fabula_core::{Input, Message, Role};
///
/// let message = Message {
///     role: Role::User,
///     content: vec![Input::Text("Hello!".to_string())],
/// };
///
/// assert_eq!(message.role, Role::User);
/// assert_eq!(message.content.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The content of the message (can be multimodal)
    pub content: Vec<Input>,
}

impl Message {
    /// Convenience constructor for a single-text user message.
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![Input::Text(text.into())],
        }
    }
}
