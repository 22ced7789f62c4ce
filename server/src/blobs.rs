//! Object storage for uploaded images, keyed by generated filename.
//!
//! Blobs are immutable once stored and are referenced by filename from a
//! recipe's `images` list. Nothing garbage-collects blobs whose recipe
//! update never happened; that window is a documented property of the
//! two-step upload-then-attach workflow.

use async_trait::async_trait;
use std::io;
use std::path::PathBuf;

/// Trait at the storage seam so handlers stay independent of the backing
/// service and tests can substitute an in-memory store.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, filename: &str, content_type: &str, bytes: &[u8]) -> io::Result<()>;
}

/// Stores blobs as plain files under a root directory.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    // The content type is not representable on a plain filesystem; an
    // object-store backend would persist it alongside the bytes.
    async fn put(&self, filename: &str, _content_type: &str, bytes: &[u8]) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(filename), bytes).await
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory store for tests.
    #[derive(Default)]
    pub struct MemoryBlobStore {
        pub blobs: Mutex<HashMap<String, (String, Vec<u8>)>>,
    }

    #[async_trait]
    impl BlobStore for MemoryBlobStore {
        async fn put(&self, filename: &str, content_type: &str, bytes: &[u8]) -> io::Result<()> {
            self.blobs.lock().unwrap().insert(
                filename.to_string(),
                (content_type.to_string(), bytes.to_vec()),
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::MemoryBlobStore;
    use super::*;

    #[tokio::test]
    async fn fs_store_writes_bytes_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path());

        store.put("abc.jpg", "image/jpeg", b"jpegbytes").await.unwrap();

        let written = std::fs::read(dir.path().join("abc.jpg")).unwrap();
        assert_eq!(written, b"jpegbytes");
    }

    #[tokio::test]
    async fn memory_store_records_content_type() {
        let store = MemoryBlobStore::default();
        store.put("x.png", "image/png", b"png").await.unwrap();

        let blobs = store.blobs.lock().unwrap();
        assert_eq!(blobs["x.png"].0, "image/png");
        assert_eq!(blobs["x.png"].1, b"png");
    }
}
