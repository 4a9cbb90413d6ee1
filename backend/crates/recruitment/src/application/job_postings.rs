//! Job Posting Use Cases

use std::sync::Arc;

use crate::domain::entities::{JobPosting, JobPostingDraft};
use crate::domain::repository::JobPostingRepository;
use crate::error::{RecruitmentError, RecruitmentResult};

/// Raw posting fields as received
#[derive(Debug, Clone, Default)]
pub struct JobPostingInput {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
}

impl JobPostingInput {
    /// Trim everything; a blank description becomes `None`, a blank location `""`
    fn into_draft(self) -> RecruitmentResult<JobPostingDraft> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(RecruitmentError::validation("title", "Title is required"));
        }

        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        let location = self
            .location
            .map(|l| l.trim().to_string())
            .unwrap_or_default();

        Ok(JobPostingDraft {
            title,
            description,
            location,
        })
    }
}

/// Create Job Posting Use Case
pub struct CreateJobPostingUseCase<R>
where
    R: JobPostingRepository,
{
    repo: Arc<R>,
}

impl<R> CreateJobPostingUseCase<R>
where
    R: JobPostingRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: JobPostingInput) -> RecruitmentResult<JobPosting> {
        let draft = input.into_draft()?;
        let posting = self.repo.create_posting(&draft).await?;

        tracing::info!(
            job_posting_id = posting.id.as_i64(),
            title = %posting.title,
            "Job posting created"
        );

        Ok(posting)
    }
}

/// Sync Job Postings Use Case
///
/// Upserts every entry by (title, location) and returns the full set.
pub struct SyncJobPostingsUseCase<R>
where
    R: JobPostingRepository,
{
    repo: Arc<R>,
}

impl<R> SyncJobPostingsUseCase<R>
where
    R: JobPostingRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        inputs: Vec<JobPostingInput>,
    ) -> RecruitmentResult<Vec<JobPosting>> {
        // Reject the whole batch before writing any of it
        let drafts = inputs
            .into_iter()
            .map(JobPostingInput::into_draft)
            .collect::<RecruitmentResult<Vec<_>>>()?;

        for draft in &drafts {
            self.repo.upsert_posting(draft).await?;
        }

        tracing::info!(count = drafts.len(), "Job postings synced");

        self.repo.list_postings().await
    }
}

/// List Job Postings Use Case
pub struct ListJobPostingsUseCase<R>
where
    R: JobPostingRepository,
{
    repo: Arc<R>,
}

impl<R> ListJobPostingsUseCase<R>
where
    R: JobPostingRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> RecruitmentResult<Vec<JobPosting>> {
        self.repo.list_postings().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryRecruitmentRepository;

    fn engineer_in_pune() -> JobPostingInput {
        JobPostingInput {
            title: "Engineer".into(),
            description: None,
            location: Some("Pune".into()),
        }
    }

    #[test]
    fn test_draft_normalization() {
        let draft = JobPostingInput {
            title: "  Engineer ".into(),
            description: Some("   ".into()),
            location: None,
        }
        .into_draft()
        .unwrap();

        assert_eq!(draft.title, "Engineer");
        assert_eq!(draft.description, None);
        assert_eq!(draft.location, "");

        assert!(matches!(
            JobPostingInput::default().into_draft(),
            Err(RecruitmentError::Validation { field: "title", .. })
        ));
    }

    #[tokio::test]
    async fn test_sync_twice_yields_one_row() {
        let repo = Arc::new(InMemoryRecruitmentRepository::new());
        let sync = SyncJobPostingsUseCase::new(repo.clone());

        sync.execute(vec![engineer_in_pune()]).await.unwrap();
        let postings = sync.execute(vec![engineer_in_pune()]).await.unwrap();

        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].title, "Engineer");
        assert_eq!(postings[0].location, "Pune");
    }

    #[tokio::test]
    async fn test_sync_rejects_batch_with_blank_title() {
        let repo = Arc::new(InMemoryRecruitmentRepository::new());
        let sync = SyncJobPostingsUseCase::new(repo.clone());

        let result = sync
            .execute(vec![engineer_in_pune(), JobPostingInput::default()])
            .await;
        assert!(result.is_err());
        assert!(ListJobPostingsUseCase::new(repo).execute().await.unwrap().is_empty());
    }
}
