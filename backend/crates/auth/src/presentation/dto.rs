//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::principal::StaffRole;
use serde::{Deserialize, Serialize};

use crate::domain::entity::StaffUser;

// ============================================================================
// Applicant login
// ============================================================================

/// Request for POST /api/user-aptitude-login
#[derive(Deserialize)]
pub struct ApplicantLoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for POST /api/user-aptitude-login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantLoginResponse {
    pub success: bool,
    pub auth_token: String,
}

// ============================================================================
// Staff login
// ============================================================================

/// Request for POST /api/admin-login
#[derive(Deserialize)]
pub struct StaffLoginRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Response for POST /api/admin-login
#[derive(Debug, Serialize)]
pub struct StaffLoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub role: StaffRole,
    pub email: String,
    pub full_name: String,
}

// ============================================================================
// Staff users
// ============================================================================

/// Request for POST /api/admin-users
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffUserRequest {
    pub email: String,
    pub password: String,
    pub role: String,
    #[serde(alias = "full_name")]
    pub full_name: String,
}

/// Staff user without the password hash
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffUserDto {
    pub id: i64,
    pub email: String,
    pub role: StaffRole,
    pub full_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<StaffUser> for StaffUserDto {
    fn from(user: StaffUser) -> Self {
        Self {
            id: user.id.as_i64(),
            email: user.email.into_db(),
            role: user.role,
            full_name: user.full_name,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Response for GET /api/admin-users
#[derive(Debug, Serialize)]
pub struct StaffUserListResponse {
    pub users: Vec<StaffUserDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applicant_response_shape() {
        let json = serde_json::to_value(ApplicantLoginResponse {
            success: true,
            auth_token: "t".into(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "authToken": "t"}));
    }

    #[test]
    fn test_create_request_accepts_both_name_spellings() {
        let a: CreateStaffUserRequest = serde_json::from_str(
            r#"{"email":"a@x.com","password":"p","role":"hr","fullName":"A"}"#,
        )
        .unwrap();
        let b: CreateStaffUserRequest = serde_json::from_str(
            r#"{"email":"a@x.com","password":"p","role":"hr","full_name":"A"}"#,
        )
        .unwrap();
        assert_eq!(a.full_name, b.full_name);
    }
}
