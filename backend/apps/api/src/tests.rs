//! End-to-end tests over the composed router with in-memory stores

use std::sync::Arc;
use std::time::Duration;

use auth::application::{BootstrapAdmin, BootstrapAdminUseCase};
use auth::domain::entity::{AptitudeAccount, NewStaffUser, StaffUser};
use auth::domain::repository::{AptitudeAccountRepository, StaffUserRepository};
use auth::domain::value_object::TokenClaims;
use auth::{AuthResult, InMemoryAuthRepository};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use kernel::email::Email;
use kernel::id::CredentialId;
use kernel::principal::StaffRole;
use platform::mail::{MailBody, RecordingMailer};
use platform::password::{HashedPassword, PasswordHasher};
use platform::token::TokenSigner;
use recruitment::notification::job::TEST_INVITATION_SUBJECT;
use recruitment::{InMemoryRecruitmentRepository, NotificationConfig, RecruitmentConfig};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::routes;

const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";
const BOUNDARY: &str = "api-test-boundary";
const ADMIN_PASSWORD: &str = "Correct-Horse-9";

/// Credentials come from the recruitment store, staff users from the auth store
#[derive(Clone, Default)]
struct SharedStore {
    recruitment: InMemoryRecruitmentRepository,
    staff: InMemoryAuthRepository,
}

impl AptitudeAccountRepository for SharedStore {
    async fn find_account_by_email(&self, email: &Email) -> AuthResult<Option<AptitudeAccount>> {
        Ok(self
            .recruitment
            .credential_for(email)
            .map(|password_hash| AptitudeAccount {
                id: CredentialId::from_i64(1),
                email: email.clone(),
                password_hash,
                created_at: Utc::now(),
            }))
    }
}

impl StaffUserRepository for SharedStore {
    async fn find_active_staff(
        &self,
        email: &Email,
        role: StaffRole,
    ) -> AuthResult<Option<StaffUser>> {
        self.staff.find_active_staff(email, role).await
    }

    async fn create_staff_user(&self, user: &NewStaffUser) -> AuthResult<StaffUser> {
        self.staff.create_staff_user(user).await
    }

    async fn list_staff_users(&self) -> AuthResult<Vec<StaffUser>> {
        self.staff.list_staff_users().await
    }

    async fn count_staff_users(&self) -> AuthResult<i64> {
        self.staff.count_staff_users().await
    }
}

struct TestApp {
    app: Router,
    store: Arc<SharedStore>,
    mailer: Arc<RecordingMailer>,
    hasher: PasswordHasher,
    signer: TokenSigner,
    _dir: tempfile::TempDir,
}

fn test_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let upload_dir = dir.path().join("uploads");
    let store = Arc::new(SharedStore::default());
    let mailer = Arc::new(RecordingMailer::new());
    let hasher = PasswordHasher::fast_insecure();
    let signer = TokenSigner::new(SECRET).unwrap();

    let api = routes::api_router(
        Arc::new(store.recruitment.clone()),
        store.clone(),
        mailer.clone(),
        hasher.clone(),
        signer.clone(),
        RecruitmentConfig::new(
            NotificationConfig {
                admin_email: "hr@example.com".into(),
                client_base_url: "https://portal.example.com/aptitude".into(),
            },
            &upload_dir,
        ),
    );

    TestApp {
        app: routes::app(api, &upload_dir),
        store,
        mailer,
        hasher,
        signer,
        _dir: dir,
    }
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn invitation_password(&self) -> String {
        for _ in 0..30 {
            if let Some(message) = self.mailer.sent_with_subject(TEST_INVITATION_SUBJECT).pop() {
                let MailBody::Html(html) = message.body else {
                    panic!("invitation must be html");
                };
                let marker = "<strong>Password:</strong> ";
                let start = html.find(marker).expect("password marker") + marker.len();
                return html[start..start + 8].to_string();
            }
            tokio::time::sleep(Duration::from_secs(10)).await;
        }
        panic!("invitation was never sent");
    }

    async fn staff_token(&self) -> String {
        BootstrapAdminUseCase::new(self.store.clone(), self.hasher.clone())
            .execute(BootstrapAdmin {
                email: "root@x.com".into(),
                password: ADMIN_PASSWORD.into(),
                full_name: "Root Admin".into(),
            })
            .await
            .unwrap();

        let (status, body) = self
            .send(post_json(
                "/api/admin-login",
                json!({"email": "root@x.com", "password": ADMIN_PASSWORD, "role": "admin"}),
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }

    /// Signs an aptitude token without going through the invitation flow
    fn applicant_token(&self, email: &str) -> String {
        let account = AptitudeAccount {
            id: CredentialId::from_i64(7),
            email: Email::new(email).unwrap(),
            password_hash: HashedPassword::from_db(String::new()),
            created_at: Utc::now(),
        };
        let claims = TokenClaims::for_applicant(&account, Utc::now().timestamp(), 3600);
        self.signer.issue(&claims).unwrap()
    }
}

fn application_form(email: &str) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in [
        ("firstName", "Asha"),
        ("lastName", "Rao"),
        ("address", "12 MG Road, Pune"),
        ("mobile", "9876543210"),
        ("email", email),
        ("graduation", "B.Tech"),
        ("cgpa", "8.5"),
        ("position", "Engineer"),
    ] {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"resume.pdf\"\r\n\
         Content-Type: application/pdf\r\n\r\n%PDF-1.4 test\r\n--{BOUNDARY}--\r\n"
    ));

    Request::builder()
        .method("POST")
        .uri("/api/applicationform")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn request_with(method: &str, uri: &str, body: Option<Value>, token: &str) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn get_with(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let t = test_app();
    let (status, body) = t.send(get_with("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_staff_routes_require_token() {
    let t = test_app();
    let (status, body) = t.send(get_with("/api/applicationforms", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);

    let (status, _) = t
        .send(post_json("/api/jobpositions", json!({"title": "Engineer"}), None))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Listing stays public on the same path
    let (status, body) = t.send(get_with("/api/jobpositions", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["positions"], json!([]));
}

#[tokio::test(start_paused = true)]
async fn test_apply_login_and_review_flow() {
    let t = test_app();

    // Submit, then resubmit the same email
    let (status, body) = t.send(application_form("a@x.com")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["savedApplication"]["email"], "a@x.com");
    assert!(body["savedApplication"]["id"].as_i64().is_some());

    let (status, body) = t.send(application_form("a@x.com")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["field"], "email");

    // The applicant logs in with the password from the delayed invitation
    let password = t.invitation_password().await;
    let (status, body) = t
        .send(post_json(
            "/api/user-aptitude-login",
            json!({"email": "a@x.com", "password": password}),
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    let applicant_token = body["authToken"].as_str().unwrap().to_string();
    let claims: TokenClaims = t.signer.verify(&applicant_token).unwrap();
    assert_eq!(claims.email, "a@x.com");

    let (status, body) = t
        .send(get_with("/api/aptitude/questions", Some(&applicant_token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"], json!([]));

    let (status, _) = t
        .send(get_with("/api/applicationforms", Some(&applicant_token)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Staff review
    let staff_token = t.staff_token().await;

    let (status, _) = t
        .send(get_with("/api/aptitude/questions", Some(&staff_token)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = t
        .send(get_with("/api/applicationforms", Some(&staff_token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    let applications = body["applications"].as_array().unwrap();
    assert_eq!(applications.len(), 1);
    let resume_url = applications[0]["resume_url"].as_str().unwrap().to_string();

    let response = t
        .app
        .clone()
        .oneshot(get_with(&resume_url, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_job_posting_sync_over_http() {
    let t = test_app();
    let token = t.staff_token().await;
    let batch = json!([
        {"title": "Engineer", "details": "Rust backend", "location": "Pune"},
    ]);

    for _ in 0..2 {
        let (status, body) = t
            .send(post_json("/api/jobpositions/sync", batch.clone(), Some(&token)))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["positions"].as_array().unwrap().len(), 1);
    }

    let (status, body) = t.send(get_with("/api/jobpositions", None)).await;
    assert_eq!(status, StatusCode::OK);
    let positions = body["positions"].as_array().unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0]["title"], "Engineer");
    assert_eq!(positions[0]["description"], "Rust backend");
    assert_eq!(positions[0]["location"], "Pune");

    // Malformed batches get the problem body, not axum's plain text
    let (status, body) = t
        .send(post_json("/api/jobpositions/sync", json!({"title": "x"}), Some(&token)))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_staff_question_management_over_http() {
    let t = test_app();
    let token = t.staff_token().await;

    let (status, created) = t
        .send(post_json(
            "/api/aptitude/admin/questions",
            json!({
                "question": "2 + 2?",
                "options": ["3", "4"],
                "correctAnswer": "4",
                "category": "Math",
                "difficulty": "easy",
            }),
            Some(&token),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["isActive"], true);
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/api/aptitude/admin/questions/{id}");

    let (status, body) = t
        .send(request_with("PATCH", &uri, Some(json!({"isActive": false})), &token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isActive"], false);

    let (status, body) = t
        .send(get_with("/api/aptitude/admin/questions", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 1);

    let (status, _) = t.send(request_with("DELETE", &uri, None, &token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = t.send(request_with("DELETE", &uri, None, &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);

    let (status, body) = t
        .send(request_with("DELETE", "/api/aptitude/admin/questions/abc", None, &token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "id");

    let (status, body) = t
        .send(get_with("/api/aptitude/admin/results", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn test_applicant_token_is_refused_on_staff_aptitude_routes() {
    let t = test_app();
    let token = t.applicant_token("a@x.com");

    let (status, _) = t
        .send(get_with("/api/aptitude/questions", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = t
        .send(post_json(
            "/api/aptitude/admin/questions",
            json!({"question": "q", "options": ["a", "b"], "correctAnswer": "a"}),
            Some(&token),
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"], 403);

    for (method, uri) in [
        ("GET", "/api/aptitude/admin/questions"),
        ("GET", "/api/aptitude/admin/results"),
        ("DELETE", "/api/aptitude/admin/questions/1"),
    ] {
        let (status, _) = t.send(request_with(method, uri, None, &token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri}");
    }

    let (status, _) = t
        .send(post_json("/api/jobpositions/sync", json!([]), Some(&token)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_application_form_without_boundary_gets_problem_details() {
    let t = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/applicationform")
        .header(header::CONTENT_TYPE, "multipart/form-data")
        .body(Body::from("firstName=Asha"))
        .unwrap();

    let (status, body) = t.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["detail"].as_str().is_some_and(|d| !d.is_empty()));
}
