//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations.

pub mod aptitude;
pub mod config;
pub mod job_postings;
pub mod list_applications;
pub mod submit_application;
