//! Use-case and HTTP tests for the recruitment crate

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use platform::mail::{MailBody, RecordingMailer};
    use platform::password::PasswordHasher;
    use tempfile::TempDir;

    use crate::application::config::{NotificationConfig, RecruitmentConfig};
    use crate::application::submit_application::{
        ResumeUpload, SubmitApplicationInput, SubmitApplicationUseCase,
    };
    use crate::infra::memory::InMemoryRecruitmentRepository;
    use crate::infra::resume_store::ResumeStore;
    use crate::notification::dispatcher::NotificationDispatcher;

    pub struct Harness {
        pub repo: Arc<InMemoryRecruitmentRepository>,
        pub mailer: Arc<RecordingMailer>,
        pub hasher: PasswordHasher,
        pub dir: TempDir,
        pub use_case: SubmitApplicationUseCase<InMemoryRecruitmentRepository, RecordingMailer>,
    }

    pub fn notification_config() -> NotificationConfig {
        NotificationConfig {
            admin_email: "hr@example.com".into(),
            client_base_url: "https://portal.example.com/aptitude".into(),
        }
    }

    pub fn harness(mailer: RecordingMailer) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let repo = Arc::new(InMemoryRecruitmentRepository::new());
        let mailer = Arc::new(mailer);
        let hasher = PasswordHasher::fast_insecure();
        let config = Arc::new(RecruitmentConfig::new(
            notification_config(),
            dir.path().join("uploads"),
        ));
        let resumes = ResumeStore::new(config.upload_dir.clone());
        let dispatcher = NotificationDispatcher::new(
            mailer.clone(),
            Arc::new(config.notification.clone()),
            resumes.clone(),
        );

        let use_case = SubmitApplicationUseCase::new(
            repo.clone(),
            resumes,
            dispatcher,
            hasher.clone(),
            config,
        );

        Harness {
            repo,
            mailer,
            hasher,
            dir,
            use_case,
        }
    }

    pub fn submission(email: &str) -> SubmitApplicationInput {
        SubmitApplicationInput {
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            address: "12 MG Road, Pune".into(),
            mobile: "9876543210".into(),
            email: email.into(),
            graduation: "B.Tech".into(),
            cgpa: "8.5".into(),
            position: "Engineer".into(),
            resume: Some(ResumeUpload {
                file_name: "resume.pdf".into(),
                bytes: b"%PDF-1.4 test".to_vec(),
            }),
        }
    }

    pub fn with_resume(
        mut input: SubmitApplicationInput,
        file_name: &str,
    ) -> SubmitApplicationInput {
        input.resume = Some(ResumeUpload {
            file_name: file_name.into(),
            bytes: b"resume bytes".to_vec(),
        });
        input
    }

    /// Number of files written to the upload directory
    pub fn stored_files(harness: &Harness) -> usize {
        std::fs::read_dir(harness.dir.path().join("uploads"))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    /// Password embedded in the invitation email
    pub fn invitation_password(body: &MailBody) -> String {
        let MailBody::Html(html) = body else {
            panic!("invitation must be html");
        };
        let marker = "<strong>Password:</strong> ";
        let start = html.find(marker).expect("password marker") + marker.len();
        html[start..start + 8].to_string()
    }
}

#[cfg(test)]
mod intake_tests {
    use std::time::Duration;

    use kernel::email::Email;
    use platform::mail::RecordingMailer;
    use platform::password::ClearTextPassword;
    use tokio::time::Instant;

    use super::support::*;
    use crate::error::RecruitmentError;
    use crate::notification::job::{
        ADMIN_ALERT_SUBJECT, CONFIRMATION_SUBJECT, TEST_INVITATION_SUBJECT, TEST_SCHEDULED_SUBJECT,
    };

    #[tokio::test(start_paused = true)]
    async fn test_valid_submission_stores_and_notifies() {
        let h = harness(RecordingMailer::new());
        let start = Instant::now();

        let output = h.use_case.execute(submission("a@x.com")).await.unwrap();
        assert_eq!(output.receipt.email.as_str(), "a@x.com");
        assert_eq!(output.receipt.first_name, "Asha");
        assert_eq!(output.receipt.position, "Engineer");
        assert!(output.receipt.id.as_i64() > 0);
        assert_eq!(h.repo.application_count(), 1);
        assert_eq!(h.repo.credential_count(), 1);
        assert_eq!(stored_files(&h), 1);

        // The invitation waits for the full delay
        tokio::time::sleep(Duration::from_secs(119)).await;
        assert!(h.mailer.sent_with_subject(TEST_INVITATION_SUBJECT).is_empty());

        for handle in output.notifications.immediate {
            handle.await.unwrap();
        }
        output.notifications.invitation.await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(120));

        assert_eq!(h.mailer.sent_with_subject(CONFIRMATION_SUBJECT).len(), 1);
        assert_eq!(h.mailer.sent_with_subject(TEST_SCHEDULED_SUBJECT).len(), 1);
        let alerts = h.mailer.sent_with_subject(ADMIN_ALERT_SUBJECT);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].to, "hr@example.com");
        assert!(alerts[0].attachment.is_some());

        let invitations = h.mailer.sent_with_subject(TEST_INVITATION_SUBJECT);
        assert_eq!(invitations.len(), 1);
        assert_eq!(invitations[0].to, "a@x.com");

        let password = invitation_password(&invitations[0].body);
        assert_eq!(password.len(), 8);
        assert!(password.chars().all(|c| c.is_ascii_hexdigit()));

        let stored = h
            .repo
            .credential_for(&Email::new("a@x.com").unwrap())
            .expect("credential stored");
        assert!(stored.as_phc_string().starts_with("$argon2id$"));
        assert!(
            h.hasher
                .verify(&ClearTextPassword::for_verification(password), &stored)
        );
        assert!(
            !h.hasher
                .verify(&ClearTextPassword::for_verification("00000000".into()), &stored)
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let h = harness(RecordingMailer::new());
        h.use_case.execute(submission("a@x.com")).await.unwrap();

        let second = h.use_case.execute(submission("A@X.COM")).await;
        assert!(matches!(second, Err(RecruitmentError::DuplicateApplicant)));
        assert_eq!(h.repo.application_count(), 1);
        assert_eq!(h.repo.credential_count(), 1);
        // Rejected before the résumé is written
        assert_eq!(stored_files(&h), 1);
    }

    #[tokio::test]
    async fn test_concurrent_duplicates_yield_one_application() {
        let h = harness(RecordingMailer::new());

        let (first, second) = tokio::join!(
            h.use_case.execute(submission("race@x.com")),
            h.use_case.execute(submission("race@x.com")),
        );

        let outcomes = [first.is_ok(), second.is_ok()];
        assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
        let failure = if let Err(e) = first { e } else { second.unwrap_err() };
        assert!(matches!(failure, RecruitmentError::DuplicateApplicant));
        assert_eq!(h.repo.application_count(), 1);
        assert_eq!(h.repo.credential_count(), 1);
    }

    #[tokio::test]
    async fn test_cgpa_boundaries() {
        let h = harness(RecordingMailer::new());

        for (i, cgpa) in ["0", "10"].into_iter().enumerate() {
            let mut input = submission(&format!("ok{i}@x.com"));
            input.cgpa = cgpa.into();
            assert!(h.use_case.execute(input).await.is_ok(), "cgpa {cgpa}");
        }

        for (i, cgpa) in ["-0.01", "10.01"].into_iter().enumerate() {
            let mut input = submission(&format!("bad{i}@x.com"));
            input.cgpa = cgpa.into();
            assert!(matches!(
                h.use_case.execute(input).await,
                Err(RecruitmentError::Validation { field: "cgpa", .. })
            ));
        }

        assert_eq!(h.repo.application_count(), 2);
    }

    #[tokio::test]
    async fn test_mobile_numbers() {
        let h = harness(RecordingMailer::new());

        let mut valid = submission("m1@x.com");
        valid.mobile = "7000000001".into();
        assert!(h.use_case.execute(valid).await.is_ok());

        for (i, mobile) in ["987654321", "98765abc10"].into_iter().enumerate() {
            let mut input = submission(&format!("m{}@x.com", i + 2));
            input.mobile = mobile.into();
            assert!(matches!(
                h.use_case.execute(input).await,
                Err(RecruitmentError::Validation { field: "mobile", .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_executable_resume_rejected_before_side_effects() {
        let h = harness(RecordingMailer::new());

        let result = h
            .use_case
            .execute(with_resume(submission("exe@x.com"), "resume.exe"))
            .await;

        assert!(matches!(result, Err(RecruitmentError::FileType { .. })));
        assert_eq!(h.repo.application_count(), 0);
        assert_eq!(h.repo.credential_count(), 0);
        assert_eq!(stored_files(&h), 0);
        assert!(h.mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_document_extensions_accepted() {
        let h = harness(RecordingMailer::new());

        for (i, name) in ["cv.pdf", "cv.doc", "CV.DOCX"].into_iter().enumerate() {
            let input = with_resume(submission(&format!("doc{i}@x.com")), name);
            assert!(h.use_case.execute(input).await.is_ok(), "{name}");
        }
        assert_eq!(stored_files(&h), 3);
    }

    #[tokio::test]
    async fn test_failing_mailer_does_not_affect_receipt() {
        let h = harness(RecordingMailer::failing());

        let output = h.use_case.execute(submission("a@x.com")).await.unwrap();
        for handle in output.notifications.immediate {
            handle.await.unwrap();
        }

        assert_eq!(output.receipt.email.as_str(), "a@x.com");
        assert_eq!(h.repo.application_count(), 1);
        assert_eq!(h.mailer.sent().len(), 3);
    }
}

#[cfg(test)]
mod aptitude_tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use kernel::email::Email;

    use crate::application::aptitude::{CreateQuestionInput, CreateQuestionUseCase};
    use crate::application::grade_test::{
        ListTestResultsUseCase, SubmitTestInput, SubmitTestUseCase,
    };
    use crate::error::RecruitmentError;
    use crate::infra::memory::InMemoryRecruitmentRepository;

    fn question(text: &str, correct: &str) -> CreateQuestionInput {
        CreateQuestionInput {
            question: text.into(),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: correct.into(),
            category: Some("logic".into()),
            difficulty: None,
        }
    }

    #[tokio::test]
    async fn test_results_are_graded_server_side() {
        let repo = Arc::new(InMemoryRecruitmentRepository::new());
        let create = CreateQuestionUseCase::new(repo.clone());
        let q1 = create.execute(question("First", "A")).await.unwrap();
        let q2 = create.execute(question("Second", "D")).await.unwrap();

        let result = SubmitTestUseCase::new(repo.clone())
            .execute(SubmitTestInput {
                email: Email::new("a@x.com").unwrap(),
                answers: BTreeMap::from([
                    (q1.id.as_i64(), Some("A".to_string())),
                    (q2.id.as_i64(), Some("B".to_string())),
                ]),
                elapsed_seconds: 300,
            })
            .await
            .unwrap();

        assert_eq!(result.score, 1);
        assert_eq!(result.total, 2);
        assert_eq!(result.percentage, 50.0);
        assert_eq!(result.email.as_str(), "a@x.com");
        assert_eq!(result.questions.len(), 2);

        let results = ListTestResultsUseCase::new(repo).execute().await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_question_and_bad_elapsed_rejected() {
        let repo = Arc::new(InMemoryRecruitmentRepository::new());
        let submit = SubmitTestUseCase::new(repo.clone());

        let unknown = submit
            .execute(SubmitTestInput {
                email: Email::new("a@x.com").unwrap(),
                answers: BTreeMap::from([(404, Some("A".to_string()))]),
                elapsed_seconds: 10,
            })
            .await;
        assert!(matches!(
            unknown,
            Err(RecruitmentError::Validation { field: "answers", .. })
        ));

        let negative = submit
            .execute(SubmitTestInput {
                email: Email::new("a@x.com").unwrap(),
                answers: BTreeMap::new(),
                elapsed_seconds: -1,
            })
            .await;
        assert!(matches!(
            negative,
            Err(RecruitmentError::Validation { field: "elapsedSeconds", .. })
        ));

        assert!(ListTestResultsUseCase::new(repo).execute().await.unwrap().is_empty());
    }
}

#[cfg(test)]
mod http_tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use platform::mail::RecordingMailer;
    use platform::password::PasswordHasher;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::support::notification_config;
    use crate::application::config::RecruitmentConfig;
    use crate::infra::memory::InMemoryRecruitmentRepository;
    use crate::presentation::router::{RecruitmentRouters, recruitment_routers};

    const BOUNDARY: &str = "recruitment-test-boundary";

    fn routers(dir: &std::path::Path) -> RecruitmentRouters {
        recruitment_routers(
            Arc::new(InMemoryRecruitmentRepository::new()),
            Arc::new(RecordingMailer::new()),
            PasswordHasher::fast_insecure(),
            RecruitmentConfig::new(notification_config(), dir),
        )
    }

    fn form(email: &str, resume_name: &str) -> Request<Body> {
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
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{resume_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n%PDF-1.4 test\r\n--{BOUNDARY}--\r\n"
        ));

        Request::builder()
            .method("POST")
            .uri("/applicationform")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_submit_then_duplicate_over_http() {
        let dir = tempfile::tempdir().unwrap();
        let public = routers(dir.path()).public;

        let response = public.clone().oneshot(form("a@x.com", "resume.pdf")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["savedApplication"]["id"].as_i64().unwrap() > 0);
        assert_eq!(body["savedApplication"]["firstName"], "Asha");
        assert_eq!(body["savedApplication"]["email"], "a@x.com");
        assert_eq!(body["savedApplication"]["position"], "Engineer");

        let response = public.oneshot(form("a@x.com", "resume.pdf")).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = json_body(response).await;
        assert_eq!(body["status"], 409);
        assert_eq!(body["field"], "email");
    }

    #[tokio::test]
    async fn test_executable_resume_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let public = routers(dir.path()).public;

        let response = public.oneshot(form("exe@x.com", "setup.exe")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["field"], "resume");
    }

    #[tokio::test]
    async fn test_job_positions_start_empty() {
        let dir = tempfile::tempdir().unwrap();
        let response = routers(dir.path())
            .public
            .oneshot(
                Request::builder()
                    .uri("/jobpositions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["positions"], Value::Array(Vec::new()));
    }
}
