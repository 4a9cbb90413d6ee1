//! Infrastructure Layer
//!
//! PostgreSQL and in-memory repositories, résumé file storage.

pub mod memory;
pub mod postgres;
pub mod resume_store;
