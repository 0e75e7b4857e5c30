use crate::core::{Payload, PayloadSource};
use crate::utils::error::{Result, UploadError};
use std::path::{Path, PathBuf};

/// Reads payloads from the local filesystem, optionally relative to a base
/// directory.
#[derive(Debug, Clone, Default)]
pub struct LocalPayloadSource {
    base_path: Option<PathBuf>,
}

impl LocalPayloadSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: Some(base_path.into()),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_path {
            Some(base) => base.join(path),
            None => path.to_path_buf(),
        }
    }
}

impl PayloadSource for LocalPayloadSource {
    async fn read_payload(&self, path: &Path) -> Result<Payload> {
        let full_path = self.resolve(path);

        let is_file = tokio::fs::metadata(&full_path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(UploadError::NotFound {
                path: full_path.display().to_string(),
            });
        }

        let bytes = tokio::fs::read(&full_path).await?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), full_path.display());

        Ok(Payload {
            path: full_path,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_exact_bytes() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("module.wasm"), [0x00, 0x61, 0x73, 0x6d]).unwrap();

        let source = LocalPayloadSource::with_base_path(dir.path());
        let payload = source.read_payload(Path::new("module.wasm")).await.unwrap();

        assert_eq!(payload.bytes, vec![0x00, 0x61, 0x73, 0x6d]);
        assert_eq!(payload.path, dir.path().join("module.wasm"));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let source = LocalPayloadSource::new();

        let err = source
            .read_payload(&dir.path().join("absent.wasm"))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        let source = LocalPayloadSource::new();

        let err = source.read_payload(dir.path()).await.unwrap_err();
        assert!(matches!(err, UploadError::NotFound { .. }));
    }
}
