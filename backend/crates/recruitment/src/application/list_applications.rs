//! List Applications Use Case

use std::sync::Arc;

use crate::domain::entities::Application;
use crate::domain::repository::ApplicationRepository;
use crate::error::RecruitmentResult;

/// List Applications Use Case (staff only)
pub struct ListApplicationsUseCase<R>
where
    R: ApplicationRepository,
{
    repo: Arc<R>,
}

impl<R> ListApplicationsUseCase<R>
where
    R: ApplicationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// All applications, newest first
    pub async fn execute(&self) -> RecruitmentResult<Vec<Application>> {
        let applications = self.repo.list_applications().await?;
        tracing::debug!(count = applications.len(), "Applications listed");
        Ok(applications)
    }
}
