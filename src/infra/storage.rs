//! Image blob storage on the local filesystem.
//!
//! Uploaded animal photos are written under a configurable directory and
//! served back under the public `/images` path. Stored filenames carry a
//! unix-timestamp prefix to avoid collisions.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::config::{ALLOWED_IMAGE_EXTENSIONS, IMAGE_URL_PREFIX};
use crate::errors::{AppError, AppResult};

/// Filesystem-backed store for uploaded images.
#[derive(Clone, Debug)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the images are stored in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the storage directory if it does not exist.
    pub async fn ensure_dir(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create image dir: {}", e)))
    }

    /// Validate the file extension against the accepted photo formats.
    ///
    /// Returns the lowercased extension.
    pub fn validate_extension(filename: &str) -> AppResult<String> {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if !ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            return Err(AppError::validation(format!(
                "Invalid image format. Only .{} are allowed.",
                ALLOWED_IMAGE_EXTENSIONS.join(", .")
            )));
        }

        Ok(ext)
    }

    /// Store an uploaded image and return its public URL path.
    ///
    /// The stored name is `{unix_timestamp}_{sanitized original name}`.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> AppResult<String> {
        Self::validate_extension(original_name)?;

        self.ensure_dir().await?;

        let filename = format!(
            "{}_{}",
            Utc::now().timestamp(),
            sanitize_filename(original_name)
        );
        let path = self.root.join(&filename);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::internal(format!("Failed to store image: {}", e)))?;

        tracing::debug!(file = %filename, "Stored uploaded image");

        Ok(format!("{}/{}", IMAGE_URL_PREFIX, filename))
    }
}

/// Replace path separators and shell-unfriendly characters so the stored
/// name is always a single safe path segment.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect()
}
