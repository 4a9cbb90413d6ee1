//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Store-assigned numeric ID types
//! - Cross-cutting validation rules (email addresses)
//! - The authenticated principal shared by the recruitment and auth contexts
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod email;
pub mod id;
pub mod principal;
