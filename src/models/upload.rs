// file: src/models/upload.rs
// description: the file chosen for prediction and how its bytes are reached
// reference: content is read lazily so oversized files are never loaded

use crate::error::{PipelineError, Result};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// A single file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    file_name: String,
    size: u64,
    content: Content,
}

impl UploadCandidate {
    /// Describe a file on disk. Only metadata is read here.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|source| PipelineError::FileOperation {
            path: path.to_path_buf(),
            source,
        })?;

        if !metadata.is_file() {
            return Err(PipelineError::FileOperation {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a file"),
            });
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            file_name,
            size: metadata.len(),
            content: Content::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            size: bytes.len() as u64,
            content: Content::Bytes(bytes),
        }
    }

    /// Candidate with a declared size whose content is never expected to be read.
    #[cfg(test)]
    pub(crate) fn sized(file_name: &str, size: u64) -> Self {
        Self {
            file_name: file_name.to_string(),
            size,
            content: Content::Bytes(Vec::new()),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Text after the last `.`; `None` when the name has no dot.
    pub fn extension(&self) -> Option<&str> {
        self.file_name
            .rfind('.')
            .map(|idx| &self.file_name[idx + 1..])
    }

    pub async fn read_content(&self) -> Result<Vec<u8>> {
        match &self.content {
            Content::Bytes(bytes) => Ok(bytes.clone()),
            Content::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| PipelineError::FileOperation {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_extension_after_last_dot() {
        assert_eq!(UploadCandidate::sized("map.osu", 1).extension(), Some("osu"));
        assert_eq!(
            UploadCandidate::sized("artist - title [hard].v2.osu", 1).extension(),
            Some("osu")
        );
        assert_eq!(UploadCandidate::sized("map.", 1).extension(), Some(""));
        assert_eq!(UploadCandidate::sized("osu", 1).extension(), None);
    }

    #[test]
    fn test_from_path_reads_metadata() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("map.osu");
        fs::write(&path, "osu file format v14\n").unwrap();

        let candidate = UploadCandidate::from_path(&path).unwrap();
        assert_eq!(candidate.file_name(), "map.osu");
        assert_eq!(candidate.size(), 20);
    }

    #[test]
    fn test_from_path_rejects_directories_and_missing_files() {
        let temp = TempDir::new().unwrap();
        assert!(UploadCandidate::from_path(temp.path()).is_err());
        assert!(UploadCandidate::from_path(temp.path().join("missing.osu")).is_err());
    }

    #[tokio::test]
    async fn test_read_content_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("map.osu");
        fs::write(&path, b"[General]").unwrap();

        let candidate = UploadCandidate::from_path(&path).unwrap();
        assert_eq!(candidate.read_content().await.unwrap(), b"[General]".to_vec());

        fs::remove_file(&path).unwrap();
        assert!(candidate.read_content().await.is_err());
    }
}
