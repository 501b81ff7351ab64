//! Storage of uploaded employee photos on the local filesystem.
//!
//! Photos live in a single directory (`<web_root>/images`). Stored names are
//! `{uuid}_{original-filename}`; only that name is persisted on the employee
//! record, never the full path.

use std::io;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::CoreError;

/// Name of the photo directory below the static-asset root.
pub const IMAGES_DIR: &str = "images";

/// Extensions accepted for uploaded photos (lowercase, without the dot).
pub const SUPPORTED_PHOTO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Longest client filename accepted, in bytes. The stored name adds a
/// 36-character uuid and an underscore, and must fit the usual 255-byte
/// filesystem limit on a single path component.
pub const MAX_PHOTO_NAME_BYTES: usize = 255 - 37;

/// An uploaded file as received from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedPhoto {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Reduce a client-supplied filename to its last path component.
///
/// Browsers on some platforms send the full client path; anything that would
/// escape the images directory is dropped here.
pub fn sanitize_file_name(raw: &str) -> Option<String> {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or("").trim();
    if last.is_empty() || last == "." || last == ".." {
        return None;
    }
    Some(last.to_string())
}

/// Check that an uploaded filename is usable and has an image extension.
///
/// Returns the sanitized name.
pub fn validate_photo_name(raw: &str) -> Result<String, CoreError> {
    let name = sanitize_file_name(raw)
        .ok_or_else(|| CoreError::Validation("Photo file name is empty".into()))?;

    if name.len() > MAX_PHOTO_NAME_BYTES {
        return Err(CoreError::Validation(format!(
            "Photo file name is too long (at most {MAX_PHOTO_NAME_BYTES} bytes)"
        )));
    }

    let ext = Path::new(&name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if !SUPPORTED_PHOTO_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported photo format '.{ext}'. Supported: {}",
            SUPPORTED_PHOTO_EXTENSIONS.join(", ")
        )));
    }
    Ok(name)
}

/// Writes and removes photo files under a fixed directory.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    images_dir: PathBuf,
}

impl PhotoStore {
    /// Store photos directly in `images_dir`.
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
        }
    }

    /// Store photos in the `images` subdirectory of a static-asset root.
    pub fn under_web_root(web_root: impl AsRef<Path>) -> Self {
        Self::new(web_root.as_ref().join(IMAGES_DIR))
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Filesystem location of a stored photo.
    pub fn path_for(&self, stored_name: &str) -> PathBuf {
        self.images_dir.join(stored_name)
    }

    /// Persist an upload under a freshly generated unique name.
    ///
    /// Returns `Ok(None)` without touching the filesystem when no file was
    /// supplied. The file handle is closed before returning, on success or
    /// error.
    pub async fn save(&self, upload: Option<&UploadedPhoto>) -> io::Result<Option<String>> {
        let Some(upload) = upload else {
            return Ok(None);
        };

        let original = sanitize_file_name(&upload.file_name).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "photo file name is empty")
        })?;
        let stored_name = format!("{}_{original}", Uuid::new_v4());

        tokio::fs::create_dir_all(&self.images_dir).await?;

        let path = self.path_for(&stored_name);
        let mut file = tokio::fs::File::create(&path).await?;
        if let Err(e) = write_all_and_flush(&mut file, &upload.bytes).await {
            drop(file);
            // Do not leave a truncated file behind.
            let _ = tokio::fs::remove_file(&path).await;
            return Err(e);
        }

        tracing::debug!(
            file = %stored_name,
            size_bytes = upload.bytes.len(),
            "Stored uploaded photo"
        );
        Ok(Some(stored_name))
    }

    /// Delete a stored photo. A missing file surfaces as `ErrorKind::NotFound`.
    pub async fn remove(&self, stored_name: &str) -> io::Result<()> {
        let name = sanitize_file_name(stored_name).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "photo file name is empty")
        })?;
        tokio::fs::remove_file(self.path_for(&name)).await?;
        tracing::debug!(file = %name, "Removed stored photo");
        Ok(())
    }
}

async fn write_all_and_flush(file: &mut tokio::fs::File, bytes: &[u8]) -> io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await?;
    file.sync_all().await
}
