//! Presentation Layer - HTTP Interface
//!
//! This layer contains:
//! - HTTP handlers (multipart intake, job postings, aptitude)
//! - Request/Response DTOs
//! - Router configuration

pub mod dto;
pub mod handlers;
pub mod router;
