//! Submit Application Use Case
//!
//! Validate, store the résumé, insert application and credential atomically,
//! then queue the applicant and HR emails without waiting for them.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use kernel::email::Email;
use kernel::id::ApplicationId;
use platform::mail::Mailer;
use platform::password::{ClearTextPassword, PasswordHasher};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::application::config::{IntakeConfig, RecruitmentConfig};
use crate::domain::entities::NewApplication;
use crate::domain::repository::ApplicationRepository;
use crate::domain::services::scheduled_test_time;
use crate::domain::value_objects::{Cgpa, MobileNumber, ResumeFileName};
use crate::error::{RecruitmentError, RecruitmentResult};
use crate::infra::resume_store::ResumeStore;
use crate::notification::dispatcher::NotificationDispatcher;
use crate::notification::job::NotificationJob;

/// Uploaded résumé as received
#[derive(Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ResumeUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResumeUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Input DTO for submit application; raw form values
#[derive(Debug, Clone, Default)]
pub struct SubmitApplicationInput {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub mobile: String,
    pub email: String,
    pub graduation: String,
    pub cgpa: String,
    pub position: String,
    pub resume: Option<ResumeUpload>,
}

/// Echo of the stored application returned to the applicant
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationReceipt {
    pub id: ApplicationId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub position: String,
}

/// Handles of the queued email tasks
///
/// Dropping them detaches the tasks; tests await them.
#[derive(Debug)]
pub struct ScheduledNotifications {
    pub immediate: Vec<JoinHandle<()>>,
    pub invitation: JoinHandle<()>,
}

/// Output DTO for submit application
#[derive(Debug)]
pub struct SubmitApplicationOutput {
    pub receipt: ApplicationReceipt,
    pub notifications: ScheduledNotifications,
}

/// Fields that passed validation, before any side effect
struct ValidatedSubmission {
    application: NewApplication,
    resume_name: ResumeFileName,
    resume_bytes: Vec<u8>,
    test_at: DateTime<FixedOffset>,
}

/// Submit Application Use Case
pub struct SubmitApplicationUseCase<R, M>
where
    R: ApplicationRepository,
    M: Mailer,
{
    repo: Arc<R>,
    resumes: ResumeStore,
    dispatcher: NotificationDispatcher<M>,
    hasher: PasswordHasher,
    config: Arc<RecruitmentConfig>,
}

impl<R, M> SubmitApplicationUseCase<R, M>
where
    R: ApplicationRepository,
    M: Mailer + Sync + Send + 'static,
{
    pub fn new(
        repo: Arc<R>,
        resumes: ResumeStore,
        dispatcher: NotificationDispatcher<M>,
        hasher: PasswordHasher,
        config: Arc<RecruitmentConfig>,
    ) -> Self {
        Self {
            repo,
            resumes,
            dispatcher,
            hasher,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: SubmitApplicationInput,
    ) -> RecruitmentResult<SubmitApplicationOutput> {
        let submitted_instant = Instant::now();
        let validated = validate(input, &self.config.intake, Utc::now())?;

        if self
            .repo
            .find_application_by_email(&validated.application.email)
            .await?
            .is_some()
        {
            tracing::info!(email = %validated.application.email, "Duplicate application");
            return Err(RecruitmentError::DuplicateApplicant);
        }

        let ValidatedSubmission {
            mut application,
            resume_name,
            resume_bytes,
            test_at,
        } = validated;

        application.resume_file = self
            .resumes
            .save(resume_name.original(), &resume_bytes)
            .await?;
        drop(resume_bytes);

        let (password, credential) = self.issue_credential().await?;

        let stored = match self
            .repo
            .insert_application_with_credential(&application, &credential)
            .await
        {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(
                    email = %application.email,
                    file = %application.resume_file,
                    "Application not stored, resume left orphaned"
                );
                return Err(e);
            }
        };

        tracing::info!(
            application_id = stored.id.as_i64(),
            email = %stored.email,
            position = %stored.position,
            "Application submitted"
        );

        let receipt = ApplicationReceipt {
            id: stored.id,
            first_name: stored.first_name.clone(),
            last_name: stored.last_name.clone(),
            email: stored.email.clone(),
            position: stored.position.clone(),
        };

        let stored = Arc::new(stored);
        let immediate = vec![
            self.dispatcher.dispatch(NotificationJob::Confirmation {
                application: stored.clone(),
            }),
            self.dispatcher.dispatch(NotificationJob::TestScheduled {
                application: stored.clone(),
                test_at,
            }),
            self.dispatcher.dispatch(NotificationJob::AdminAlert {
                application: stored.clone(),
            }),
        ];
        let invitation = self.dispatcher.dispatch_at(
            NotificationJob::TestInvitation {
                application: stored,
                password,
            },
            submitted_instant + self.config.intake.invitation_delay,
        );

        Ok(SubmitApplicationOutput {
            receipt,
            notifications: ScheduledNotifications {
                immediate,
                invitation,
            },
        })
    }

    /// Generate the one-time password and hash it off the async workers
    async fn issue_credential(
        &self,
    ) -> RecruitmentResult<(ClearTextPassword, platform::password::HashedPassword)> {
        let hasher = self.hasher.clone();
        let (password, hashed) = tokio::task::spawn_blocking(move || {
            let password = ClearTextPassword::generate_one_time();
            let hashed = hasher.hash(&password);
            (password, hashed)
        })
        .await
        .map_err(|e| RecruitmentError::Internal(format!("Credential task failed: {e}")))?;

        let hashed = hashed.map_err(|e| RecruitmentError::Internal(e.to_string()))?;
        Ok((password, hashed))
    }
}

fn validate(
    input: SubmitApplicationInput,
    config: &IntakeConfig,
    submitted_at: DateTime<Utc>,
) -> RecruitmentResult<ValidatedSubmission> {
    let first_name =
        required_text("firstName", "First name", &input.first_name, config.name_min_len)?;
    let last_name =
        required_text("lastName", "Last name", &input.last_name, config.name_min_len)?;
    let address =
        required_text("address", "Address", &input.address, config.address_min_len)?;
    let mobile = MobileNumber::parse(&input.mobile, &config.mobile_pattern)?;
    let email = Email::new(&input.email)
        .map_err(|e| RecruitmentError::validation("email", e.message()))?;
    let graduation =
        required_text("graduation", "Graduation", &input.graduation, config.name_min_len)?;
    let cgpa = Cgpa::parse(&input.cgpa)?;
    let position = required_text("position", "Position", &input.position, 1)?;

    let resume = input
        .resume
        .ok_or_else(|| RecruitmentError::validation("resume", "Please upload your resume"))?;
    if resume.bytes.is_empty() {
        return Err(RecruitmentError::validation("resume", "The uploaded resume is empty"));
    }
    if resume.bytes.len() > config.max_resume_bytes {
        return Err(RecruitmentError::validation(
            "resume",
            format!(
                "Resume must not exceed {} KB",
                config.max_resume_bytes / 1024
            ),
        ));
    }
    let resume_name = ResumeFileName::parse(&resume.file_name)?;

    if !config.is_allowed_extension(resume_name.extension()) {
        return Err(RecruitmentError::FileType {
            allowed: config.allowed_extensions_label(),
        });
    }

    let test_at = scheduled_test_time(
        submitted_at,
        config.test_days_ahead,
        config.test_hour,
        config.schedule_utc_offset_minutes,
    )
    .ok_or_else(|| RecruitmentError::Internal("Invalid aptitude test schedule".into()))?;

    Ok(ValidatedSubmission {
        application: NewApplication {
            first_name,
            last_name,
            address,
            mobile,
            email,
            graduation,
            cgpa,
            position,
            resume_file: String::new(),
        },
        resume_name,
        resume_bytes: resume.bytes,
        test_at,
    })
}

fn required_text(
    field: &'static str,
    label: &str,
    raw: &str,
    min_len: usize,
) -> RecruitmentResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RecruitmentError::validation(field, format!("{label} is required")));
    }
    if trimmed.chars().count() < min_len {
        return Err(RecruitmentError::validation(
            field,
            format!("{label} must be at least {min_len} characters"),
        ));
    }
    Ok(trimmed.to_string())
}
