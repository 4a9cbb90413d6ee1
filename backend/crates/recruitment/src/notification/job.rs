//! Notification Jobs
//!
//! The four emails sent for every accepted application.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use platform::mail::{MailBody, OutgoingMessage};
use platform::password::ClearTextPassword;

use crate::application::config::NotificationConfig;
use crate::domain::entities::Application;
use crate::domain::services::format_test_time;

pub const CONFIRMATION_SUBJECT: &str = "Your Application Submitted Successfully";
pub const ADMIN_ALERT_SUBJECT: &str = "New Job Application Submitted";
pub const TEST_SCHEDULED_SUBJECT: &str = "Your Scheduled Aptitude Test Date & Time";
pub const TEST_INVITATION_SUBJECT: &str = "Aptitude Test Invitation";

/// One email tied to an application, delivered at most once
#[derive(Debug)]
pub enum NotificationJob {
    /// Receipt to the applicant
    Confirmation { application: Arc<Application> },
    /// Summary to HR with the résumé attached
    AdminAlert { application: Arc<Application> },
    /// Announces the future test date to the applicant
    TestScheduled {
        application: Arc<Application>,
        test_at: DateTime<FixedOffset>,
    },
    /// Live login credentials and the start-test link
    TestInvitation {
        application: Arc<Application>,
        password: ClearTextPassword,
    },
}

impl NotificationJob {
    /// Stable name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationJob::Confirmation { .. } => "confirmation",
            NotificationJob::AdminAlert { .. } => "admin_alert",
            NotificationJob::TestScheduled { .. } => "test_scheduled",
            NotificationJob::TestInvitation { .. } => "test_invitation",
        }
    }

    pub fn application(&self) -> &Application {
        match self {
            NotificationJob::Confirmation { application }
            | NotificationJob::AdminAlert { application }
            | NotificationJob::TestScheduled { application, .. }
            | NotificationJob::TestInvitation { application, .. } => application,
        }
    }

    /// Stored résumé to attach, read at send time
    pub fn attachment_file(&self) -> Option<&str> {
        match self {
            NotificationJob::AdminAlert { application } => Some(&application.resume_file),
            _ => None,
        }
    }

    /// Compose the message without any attachment
    pub fn compose(&self, config: &NotificationConfig) -> OutgoingMessage {
        let application = self.application();
        let first_name = escape_html(&application.first_name);

        let (to, subject, body) = match self {
            NotificationJob::Confirmation { .. } => (
                application.email.to_string(),
                CONFIRMATION_SUBJECT,
                MailBody::Plain(format!(
                    "Hi {},\n\nThank you for applying. We have received your application.\n\nRegards,\nTeam",
                    application.first_name
                )),
            ),
            NotificationJob::AdminAlert { .. } => (
                config.admin_email.clone(),
                ADMIN_ALERT_SUBJECT,
                MailBody::Plain(format!(
                    "New applicant:\n\nName: {}\nEmail: {}\nMobile: {}\nPosition: {}",
                    application.full_name(),
                    application.email,
                    application.mobile.as_str(),
                    application.position,
                )),
            ),
            NotificationJob::TestScheduled { test_at, .. } => (
                application.email.to_string(),
                TEST_SCHEDULED_SUBJECT,
                MailBody::Html(format!(
                    "<p>Hi {first_name},</p>\n\
                     <p>Your aptitude test is scheduled for <strong>{}</strong>.</p>\n\
                     <p>Your login credentials will follow in a separate email.</p>\n\
                     <p>Best of luck!</p>",
                    format_test_time(test_at)
                )),
            ),
            NotificationJob::TestInvitation { password, .. } => (
                application.email.to_string(),
                TEST_INVITATION_SUBJECT,
                MailBody::Html(format!(
                    "<p>Hi {first_name},</p>\n\
                     <p>You're invited to take the aptitude test.</p>\n\
                     <p><strong>Login Credentials:</strong></p>\n\
                     <ul>\n\
                     <li><strong>Login ID:</strong> {}</li>\n\
                     <li><strong>Password:</strong> {}</li>\n\
                     </ul>\n\
                     <p>Click the button below to start the test:</p>\n\
                     <a href=\"{}\" target=\"_blank\" style=\"padding: 10px 20px; background-color: #007BFF; color: white; text-decoration: none; border-radius: 5px;\">Start Test</a>\n\
                     <p>Best of luck!</p>",
                    escape_html(application.email.as_str()),
                    escape_html(password.expose()),
                    escape_html(&config.client_base_url),
                )),
            ),
        };

        OutgoingMessage {
            to,
            subject: subject.to_string(),
            body,
            attachment: None,
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
