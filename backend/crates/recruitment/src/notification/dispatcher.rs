//! Notification Dispatcher
//!
//! Fire-and-forget delivery of [`NotificationJob`]s. Every job runs in its own
//! task; failures are logged with the application id and job kind and then
//! dropped. A deferred job lives only in its timer task, so a process restart
//! loses it.

use std::sync::Arc;

use platform::mail::{MailAttachment, Mailer};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::application::config::NotificationConfig;
use crate::domain::value_objects::content_type_for_extension;
use crate::infra::resume_store::ResumeStore;
use crate::notification::job::NotificationJob;

pub struct NotificationDispatcher<M> {
    mailer: Arc<M>,
    config: Arc<NotificationConfig>,
    resumes: ResumeStore,
}

impl<M> Clone for NotificationDispatcher<M> {
    fn clone(&self) -> Self {
        Self {
            mailer: self.mailer.clone(),
            config: self.config.clone(),
            resumes: self.resumes.clone(),
        }
    }
}

impl<M> NotificationDispatcher<M>
where
    M: Mailer + Sync + Send + 'static,
{
    pub fn new(mailer: Arc<M>, config: Arc<NotificationConfig>, resumes: ResumeStore) -> Self {
        Self {
            mailer,
            config,
            resumes,
        }
    }

    /// Send in the background right away
    pub fn dispatch(&self, job: NotificationJob) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move { this.deliver(job).await })
    }

    /// Send in the background once `at` has passed
    pub fn dispatch_at(&self, job: NotificationJob, at: Instant) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep_until(at).await;
            this.deliver(job).await;
        })
    }

    async fn deliver(&self, job: NotificationJob) {
        let application_id = job.application().id.as_i64();
        let kind = job.kind();

        let mut message = job.compose(&self.config);
        if let Some(file_name) = job.attachment_file() {
            message.attachment = self.read_attachment(application_id, file_name).await;
        }
        // Drops the one-time password as soon as the message exists
        drop(job);

        match self.mailer.send(message).await {
            Ok(()) => {
                tracing::info!(application_id, job = kind, "Notification sent");
            }
            Err(e) => {
                tracing::error!(application_id, job = kind, error = %e, "Notification failed");
            }
        }
    }

    async fn read_attachment(
        &self,
        application_id: i64,
        file_name: &str,
    ) -> Option<MailAttachment> {
        match tokio::fs::read(self.resumes.path_of(file_name)).await {
            Ok(bytes) => {
                let extension = std::path::Path::new(file_name)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .unwrap_or_default();
                Some(MailAttachment {
                    filename: file_name.to_string(),
                    content_type: content_type_for_extension(extension).to_string(),
                    bytes,
                })
            }
            Err(e) => {
                tracing::warn!(
                    application_id,
                    file = %file_name,
                    error = %e,
                    "Resume unreadable, sending without attachment"
                );
                None
            }
        }
    }
}
