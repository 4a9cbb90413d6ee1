//! Outgoing Mail
//!
//! [`Mailer`] is the seam between notification code and the transport.
//! [`SmtpMailer`] talks to an authenticated relay through lettre; the
//! blocking SMTP exchange runs on the blocking thread pool and is bounded
//! by the configured timeout.

use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;

/// Port on which the relay expects implicit TLS; everything else uses STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

// ============================================================================
// Message model
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailBody {
    Plain(String),
    Html(String),
}

#[derive(Clone, PartialEq, Eq)]
pub struct MailAttachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for MailAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailAttachment")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A single email ready for the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub to: String,
    pub subject: String,
    pub body: MailBody,
    pub attachment: Option<MailAttachment>,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid mail address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),

    #[error("Mail task failed: {0}")]
    Task(String),
}

// ============================================================================
// Mailer trait
// ============================================================================

#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Deliver one message. A returned error has already cost one attempt;
    /// callers decide whether that is worth logging.
    async fn send(&self, message: OutgoingMessage) -> Result<(), MailError>;
}

// ============================================================================
// SMTP implementation
// ============================================================================

/// Connection settings for the relay
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    pub from_name: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .field("from_name", &self.from_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Clone)]
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let from = Mailbox::new(
            Some(config.from_name.clone()),
            config
                .from_address
                .parse()
                .map_err(|_| MailError::InvalidAddress(config.from_address.clone()))?,
        );

        let builder = if config.port == IMPLICIT_TLS_PORT {
            SmtpTransport::relay(&config.host)
        } else {
            SmtpTransport::starttls_relay(&config.host)
        }
        .map_err(|e| MailError::Transport(e.to_string()))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(config.timeout))
            .build();

        Ok(Self { transport, from })
    }
}

fn build_message(from: &Mailbox, message: OutgoingMessage) -> Result<Message, MailError> {
    let to: Mailbox = message
        .to
        .parse()
        .map_err(|_| MailError::InvalidAddress(message.to.clone()))?;

    let builder = Message::builder()
        .from(from.clone())
        .to(to)
        .subject(message.subject);

    let body_part = match message.body {
        MailBody::Plain(text) => SinglePart::plain(text),
        MailBody::Html(html) => SinglePart::html(html),
    };

    let built = match message.attachment {
        None => builder.singlepart(body_part),
        Some(attachment) => {
            let content_type = ContentType::parse(&attachment.content_type)
                .or_else(|_| ContentType::parse("application/octet-stream"))
                .map_err(|e| MailError::Build(e.to_string()))?;
            let part = Attachment::new(attachment.filename).body(attachment.bytes, content_type);
            builder.multipart(MultiPart::mixed().singlepart(body_part).singlepart(part))
        }
    };

    built.map_err(|e| MailError::Build(e.to_string()))
}

impl Mailer for SmtpMailer {
    async fn send(&self, message: OutgoingMessage) -> Result<(), MailError> {
        let recipient = message.to.clone();
        let email = build_message(&self.from, message)?;
        let transport = self.transport.clone();

        let sent = tokio::task::spawn_blocking(move || transport.send(&email))
            .await
            .map_err(|e| MailError::Task(e.to_string()))?;

        match sent {
            Ok(_) => {
                tracing::debug!(to = %recipient, "Relay accepted message");
                Ok(())
            }
            Err(e) if e.is_timeout() => {
                tracing::warn!(to = %recipient, "SMTP relay timed out");
                Err(MailError::Transport(e.to_string()))
            }
            Err(e) => {
                tracing::debug!(
                    to = %recipient,
                    permanent = e.is_permanent(),
                    "SMTP relay refused message"
                );
                Err(MailError::Transport(e.to_string()))
            }
        }
    }
}

// ============================================================================
// Recording implementation (tests)
// ============================================================================

/// Mailer that keeps every message in memory instead of sending it
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: std::sync::Mutex<Vec<OutgoingMessage>>,
    fail: bool,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every send fails after recording the attempt
    pub fn failing() -> Self {
        Self {
            sent: Default::default(),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    pub fn sent_with_subject(&self, subject: &str) -> Vec<OutgoingMessage> {
        self.sent()
            .into_iter()
            .filter(|message| message.subject == subject)
            .collect()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Mailer for RecordingMailer {
    async fn send(&self, message: OutgoingMessage) -> Result<(), MailError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message);
        }
        if self.fail {
            return Err(MailError::Transport("relay refused connection".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Duration, MailAttachment, MailBody, MailError, Mailbox, Mailer, OutgoingMessage,
        RecordingMailer, SmtpConfig, SmtpMailer, build_message,
    };

    fn from() -> Mailbox {
        Mailbox::new(
            Some("Recruitment Team".into()),
            "noreply@example.com".parse().unwrap(),
        )
    }

    fn plain(to: &str) -> OutgoingMessage {
        OutgoingMessage {
            to: to.into(),
            subject: "Application received".into(),
            body: MailBody::Plain("Thanks".into()),
            attachment: None,
        }
    }

    #[test]
    fn test_build_plain_message() {
        let message = build_message(&from(), plain("priya@example.com")).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Application received"));
        assert!(raw.contains("Recruitment Team"));
    }

    #[test]
    fn test_build_message_with_attachment() {
        let message = OutgoingMessage {
            to: "hr@example.com".into(),
            subject: "New application".into(),
            body: MailBody::Html("<p>New</p>".into()),
            attachment: Some(MailAttachment {
                filename: "resume.pdf".into(),
                content_type: "application/pdf".into(),
                bytes: b"%PDF-1.4".to_vec(),
            }),
        };
        let raw = String::from_utf8(build_message(&from(), message).unwrap().formatted()).unwrap();
        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("resume.pdf"));
    }

    #[test]
    fn test_invalid_recipient() {
        let result = build_message(&from(), plain("not an address"));
        assert!(matches!(result, Err(MailError::InvalidAddress(_))));
    }

    #[test]
    fn test_config_debug_redacts_password() {
        let config = SmtpConfig {
            host: "h".into(),
            port: 587,
            username: "u".into(),
            password: "hunter2".into(),
            from_address: "a@b.c".into(),
            from_name: "n".into(),
            timeout: Duration::from_secs(1),
        };
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[tokio::test]
    async fn test_unreachable_relay_is_transport_error() {
        let mailer = SmtpMailer::new(&SmtpConfig {
            host: "localhost".into(),
            port: 1,
            username: "u".into(),
            password: "p".into(),
            from_address: "noreply@example.com".into(),
            from_name: "Recruitment Team".into(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();

        let result = mailer.send(plain("a@example.com")).await;
        assert!(matches!(result, Err(MailError::Transport(_))));
    }

    #[tokio::test]
    async fn test_recording_mailer() {
        let mailer = RecordingMailer::new();
        mailer.send(plain("a@example.com")).await.unwrap();
        assert_eq!(mailer.sent_with_subject("Application received").len(), 1);

        let failing = RecordingMailer::failing();
        assert!(failing.send(plain("a@example.com")).await.is_err());
        assert_eq!(failing.sent().len(), 1);
    }
}
