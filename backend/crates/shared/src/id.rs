//! Common ID Types
//!
//! Type-safe wrappers around store-assigned numeric identifiers.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type ApplicationId = Id<markers::Application>;
/// let id = ApplicationId::from_i64(7);
/// assert_eq!(id.as_i64(), 7);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wrap a value assigned by the store
    pub const fn from_i64(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn as_i64(&self) -> i64 {
        self.value
    }
}

// Manual impls so the marker type does not need to implement anything.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::from_i64)
    }
}

/// Marker types for different entity IDs
pub mod markers {
    pub struct Application;
    pub struct JobPosting;
    pub struct AptitudeQuestion;
    pub struct TestResult;
    pub struct StaffUser;
    pub struct AptitudeCredential;
}

pub type ApplicationId = Id<markers::Application>;
pub type JobPostingId = Id<markers::JobPosting>;
pub type QuestionId = Id<markers::AptitudeQuestion>;
pub type TestResultId = Id<markers::TestResult>;
pub type StaffUserId = Id<markers::StaffUser>;
pub type CredentialId = Id<markers::AptitudeCredential>;
