//! Byte-oriented file storage used by the `/files` routes.
//!
//! Names are joined onto the root directory as given. There is no traversal check, so a
//! name like `../secret` escapes the root: only serve a directory to trusted local clients.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::trace;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("file {name} not found")]
    NotFound { name: String },

    #[error("io error on file {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// Classifies an I/O error, keeping "does not exist" apart from every other fault.
    pub fn from_io(name: &str, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { name: name.to_owned() },
            _ => Self::Io { name: name.to_owned(), source },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Read and write whole files by name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStore: Send + Sync + 'static {
    /// Reads the whole file, failing with [`StoreError::NotFound`] when it doesn't exist.
    async fn read(&self, name: &str) -> Result<Bytes, StoreError>;

    /// Creates or truncates the file and writes `contents` to it.
    async fn write(&self, name: &str, contents: Bytes) -> Result<(), StoreError>;
}

/// A [`FileStore`] rooted at a directory on the local filesystem.
///
/// Concurrent writes to the same name are not coordinated.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FileStore for DirStore {
    async fn read(&self, name: &str) -> Result<Bytes, StoreError> {
        let path = self.root.join(name);
        trace!(path = %path.display(), "reading file");
        let contents = tokio::fs::read(&path).await.map_err(|e| StoreError::from_io(name, e))?;
        Ok(Bytes::from(contents))
    }

    async fn write(&self, name: &str, contents: Bytes) -> Result<(), StoreError> {
        let path = self.root.join(name);
        trace!(path = %path.display(), size = contents.len(), "writing file");
        tokio::fs::write(&path, &contents).await.map_err(|e| StoreError::from_io(name, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn scratch_dir() -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let dir = std::env::temp_dir()
            .join(format!("tern-store-{}-{}", std::process::id(), COUNTER.fetch_add(1, Ordering::Relaxed)));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn write_then_read() {
        let store = DirStore::new(scratch_dir());

        store.write("hello.txt", Bytes::from_static(b"hello")).await.unwrap();
        assert_eq!(&store.read("hello.txt").await.unwrap()[..], b"hello");

        store.write("hello.txt", Bytes::from_static(b"hi")).await.unwrap();
        assert_eq!(&store.read("hello.txt").await.unwrap()[..], b"hi");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let store = DirStore::new(scratch_dir());

        let err = store.read("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn reading_a_directory_is_an_io_fault() {
        let root = scratch_dir();
        std::fs::create_dir_all(root.join("nested")).unwrap();
        let store = DirStore::new(root);

        let err = store.read("nested").await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn classify_io_errors() {
        assert!(StoreError::from_io("a", io::Error::from(io::ErrorKind::NotFound)).is_not_found());
        assert!(!StoreError::from_io("a", io::Error::from(io::ErrorKind::PermissionDenied)).is_not_found());
    }
}
