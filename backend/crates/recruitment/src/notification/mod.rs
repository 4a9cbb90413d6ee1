//! Notification Layer
//!
//! Applicant and HR emails composed from a stored application and handed to
//! a [`platform::mail::Mailer`], immediately or after a delay.

pub mod dispatcher;
pub mod job;
