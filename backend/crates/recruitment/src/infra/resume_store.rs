//! Résumé Storage
//!
//! Writes uploads under the configured directory. Names are generated by
//! [`stored_resume_name`] and opened with create-new semantics, so an
//! existing file is never overwritten.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use platform::crypto::random_hex;
use tokio::io::AsyncWriteExt;

use crate::domain::services::stored_resume_name;

const NAME_TOKEN_BYTES: usize = 4;
const MAX_NAME_ATTEMPTS: usize = 5;

#[derive(Debug, Clone)]
pub struct ResumeStore {
    dir: PathBuf,
}

impl ResumeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Absolute or relative path of a stored file
    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Persist `bytes` and return the stored file name
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> std::io::Result<String> {
        tokio::fs::create_dir_all(&self.dir).await?;

        for _ in 0..MAX_NAME_ATTEMPTS {
            let file_name =
                stored_resume_name(Utc::now(), &random_hex(NAME_TOKEN_BYTES), original_name);
            let path = self.path_of(&file_name);

            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            };

            file.write_all(bytes).await?;
            file.sync_all().await?;

            tracing::debug!(file = %file_name, size = bytes.len(), "Resume stored");
            return Ok(file_name);
        }

        Err(std::io::Error::new(
            ErrorKind::AlreadyExists,
            "could not find a free resume file name",
        ))
    }
}
