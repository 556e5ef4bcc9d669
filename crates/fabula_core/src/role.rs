//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Roles are the same across modalities (text, image, etc.)
///
/// # Examples
///
/// ```
/// use fabula_core::Role;
///
/// assert_ne!(Role::User, Role::Model);
/// assert_eq!(format!("{}", Role::User), "User");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// User messages carry the instruction and conditioning content
    User,
    /// Model messages are prior backend output fed back as context
    Model,
}
