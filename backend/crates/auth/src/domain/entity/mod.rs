//! Entities

pub mod aptitude_account;
pub mod staff_user;

pub use aptitude_account::AptitudeAccount;
pub use staff_user::{NewStaffUser, StaffUser};
