//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (OS random bytes, hex rendering)
//! - Password hashing (Argon2id) and one-time password generation
//! - Outgoing mail transport (SMTP relay behind the `Mailer` trait)
//! - Signed bearer tokens (HS256 JWT)

pub mod crypto;
pub mod mail;
pub mod password;
pub mod token;
