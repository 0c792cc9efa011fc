//! Content source backed by a local directory of pinned files

use crate::core::{ContentSource, IndexerResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// Resolves a cid to the file `<root>/<cid>`
#[derive(Debug, Clone)]
pub struct LocalContentSource {
    root: PathBuf,
}

impl LocalContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, cid: &str) -> Option<PathBuf> {
        // A cid is a single path component
        if cid.is_empty() || cid.contains(['/', '\\']) || cid == "." || cid == ".." {
            return None;
        }
        Some(self.root.join(cid))
    }
}

#[async_trait]
impl ContentSource for LocalContentSource {
    async fn resolve(&self, cid: &str) -> IndexerResult<Option<Vec<u8>>> {
        let Some(path) = self.path_for(cid) else {
            debug!("Refusing to resolve invalid cid {:?}", cid);
            return Ok(None);
        };

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("Failed to read content {}", path.display()))
                .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_resolve_existing_and_missing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("QmPinned"), br#"{"title":"t"}"#).unwrap();
        let source = LocalContentSource::new(dir.path());

        let bytes = source.resolve("QmPinned").await.unwrap();
        assert_eq!(bytes.as_deref(), Some(&br#"{"title":"t"}"#[..]));
        assert_eq!(source.resolve("QmMissing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_path_like_cids_are_not_resolved() {
        let dir = TempDir::new().unwrap();
        let source = LocalContentSource::new(dir.path());

        assert_eq!(source.resolve("../etc/passwd").await.unwrap(), None);
        assert_eq!(source.resolve("").await.unwrap(), None);
    }
}
