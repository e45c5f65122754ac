// src/images.rs
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use axum::body::Bytes;
use tokio::fs;

/// URL prefix under which stored images are served.
pub const PUBLIC_PREFIX: &str = "/uploads/";

/// The `image` field of a product form.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadedImage {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Browsers post an empty part when no file was chosen.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores the image and returns the URL templates should link to.
    async fn save(&self, image: &UploadedImage) -> io::Result<String>;
}

/// Writes images to `<root>/<original file name>`.
///
/// The original name is the storage key: a second upload with the same name
/// replaces the first, and concurrent uploads of one name race with the last
/// writer winning.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, image: &UploadedImage) -> io::Result<String> {
        let path = self.root.join(&image.file_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, &image.bytes).await?;

        Ok(format!("{PUBLIC_PREFIX}{}", image.file_name))
    }
}

#[cfg(test)]
pub struct FailingImageStore;

#[cfg(test)]
#[async_trait]
impl ImageStore for FailingImageStore {
    async fn save(&self, _image: &UploadedImage) -> io::Result<String> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only filesystem"))
    }
}
