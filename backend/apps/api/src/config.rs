//! Server configuration from the environment
//!
//! Required variables fail startup with the variable name in the error.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::application::BootstrapAdmin;
use platform::mail::SmtpConfig;
use platform::token::MIN_SECRET_LENGTH;

pub const DEFAULT_LOG_FILTER: &str = "api=info,recruitment=info,auth=info,tower_http=info";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

pub struct ApiConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub smtp: SmtpConfig,
    pub admin_notification_email: String,
    pub client_base_url: String,
    pub upload_dir: PathBuf,
    pub invite_delay: Duration,
    pub password_pepper: Option<Vec<u8>>,
    pub frontend_origins: Vec<String>,
    pub listen_port: u16,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &str| get(key).with_context(|| format!("{key} must be set"));

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.len() < MIN_SECRET_LENGTH {
            bail!("JWT_SECRET must be at least {MIN_SECRET_LENGTH} bytes");
        }

        let smtp = SmtpConfig {
            host: required("SMTP_HOST")?,
            port: parse_or(get("SMTP_PORT"), "SMTP_PORT", 587)?,
            username: required("SMTP_USERNAME")?,
            password: required("SMTP_PASSWORD")?,
            from_address: required("MAIL_FROM_ADDRESS")?,
            from_name: get("MAIL_FROM_NAME").unwrap_or_else(|| "Recruitment Team".to_string()),
            timeout: Duration::from_secs(parse_or(
                get("SMTP_TIMEOUT_SECS"),
                "SMTP_TIMEOUT_SECS",
                20,
            )?),
        };

        let bootstrap_admin = match (
            get("BOOTSTRAP_ADMIN_EMAIL"),
            get("BOOTSTRAP_ADMIN_PASSWORD"),
            get("BOOTSTRAP_ADMIN_NAME"),
        ) {
            (Some(email), Some(password), Some(full_name)) => Some(BootstrapAdmin {
                email,
                password,
                full_name,
            }),
            (None, None, None) => None,
            _ => bail!(
                "BOOTSTRAP_ADMIN_EMAIL, BOOTSTRAP_ADMIN_PASSWORD and BOOTSTRAP_ADMIN_NAME must be set together"
            ),
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            database_max_connections: parse_or(
                get("DATABASE_MAX_CONNECTIONS"),
                "DATABASE_MAX_CONNECTIONS",
                5,
            )?,
            jwt_secret,
            smtp,
            admin_notification_email: required("ADMIN_NOTIFICATION_EMAIL")?,
            client_base_url: required("CLIENT_BASE_URL")?,
            upload_dir: get("UPLOAD_DIR").unwrap_or_else(|| "uploads".to_string()).into(),
            invite_delay: Duration::from_secs(parse_or(
                get("APTITUDE_INVITE_DELAY_SECS"),
                "APTITUDE_INVITE_DELAY_SECS",
                120,
            )?),
            password_pepper: get("PASSWORD_PEPPER").map(String::into_bytes),
            frontend_origins: get("FRONTEND_ORIGINS")
                .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            listen_port: parse_or(get("LISTEN_PORT"), "LISTEN_PORT", 8000)?,
            bootstrap_admin,
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}
