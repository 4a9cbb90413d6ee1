//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Application, JobPosting, AptitudeQuestion, TestResult)
//! - Domain value objects (MobileNumber, Cgpa, ResumeFileName, Difficulty)
//! - Domain services (résumé naming, test scheduling, grading)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
