use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Source files of the data set, one per branch and month.
/// Records are concatenated in this order.
pub const SOURCE_FILES: [&str; 12] = [
    "jan-agoncillo-2026.json",
    "jan-bayan-2026.json",
    "jan-caloocan-2026.json",
    "jan-cuenca-2026.json",
    "jan-gulod-2026.json",
    "jan-stateresita-2026.json",
    "dec-agoncillo-2025.json",
    "dec-bayan-2025.json",
    "dec-caloocan-2025.json",
    "dec-cuenca-2025.json",
    "dec-gulod-2025.json",
    "dec-stateresita-2025.json",
];

/// Failure to fetch or parse a source file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read source {file}: {error}")]
    Read {
        file: String,
        #[source]
        error: std::io::Error,
    },

    #[error("source {file} is not valid JSON: {error}")]
    Parse {
        file: String,
        #[source]
        error: serde_json::Error,
    },

    #[error("source {0} is unavailable")]
    Unavailable(String),
}

/// Fetches one source document by file name
#[async_trait]
pub trait SourceLoader: Send + Sync {
    async fn fetch(&self, file: &str) -> Result<Value, LoadError>;
}

/// Reads source documents from a directory on disk
#[derive(Debug, Clone)]
pub struct FsSourceLoader {
    dir: PathBuf,
}

impl FsSourceLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl SourceLoader for FsSourceLoader {
    async fn fetch(&self, file: &str) -> Result<Value, LoadError> {
        let path = self.dir.join(file);
        tracing::debug!("Reading source {}", path.display());

        let bytes = tokio::fs::read(&path).await.map_err(|error| LoadError::Read {
            file: file.to_string(),
            error,
        })?;

        serde_json::from_slice(&bytes).map_err(|error| LoadError::Parse {
            file: file.to_string(),
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fs_loader_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("jan-gulod-2026.json"),
            r#"{"branch": "GULOD", "data": []}"#,
        )
        .unwrap();

        let loader = FsSourceLoader::new(dir.path());
        let value = loader.fetch("jan-gulod-2026.json").await.unwrap();
        assert_eq!(value["branch"], "GULOD");
    }

    #[tokio::test]
    async fn test_fs_loader_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FsSourceLoader::new(dir.path());

        let err = loader.fetch("nope.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Read { ref file, .. } if file == "nope.json"));
    }

    #[tokio::test]
    async fn test_fs_loader_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        let loader = FsSourceLoader::new(dir.path());

        let err = loader.fetch("broken.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
