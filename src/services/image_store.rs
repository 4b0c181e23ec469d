//! Local-disk image storage
//!
//! Stores uploaded product photos under the configured directory and hands
//! back public URLs; the product row only ever keeps the reference strings,
//! comma-joined. Deletions of stale files are best-effort by design: the
//! row mutation is committed first and cleanup failures are logged, never
//! bubbled into the request outcome.

use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::errors::{EtalaseError, Result};

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

pub struct ImageStore {
    dir: PathBuf,
    public_base_url: String,
}

impl ImageStore {
    pub fn new(config: &UploadConfig) -> Result<Self> {
        let dir = PathBuf::from(&config.dir);
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Persist one uploaded file and return its public URL reference
    pub fn store(&self, original_name: &str, temp_path: &Path) -> Result<String> {
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(EtalaseError::validation(format!(
                "Unsupported image type: '{}' (allowed: {})",
                original_name,
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }

        let file_name = format!("{}.{}", Uuid::new_v4().simple(), ext);
        let dest = self.dir.join(&file_name);
        std::fs::copy(temp_path, &dest)?;

        Ok(format!("{}/images/{}", self.public_base_url, file_name))
    }

    /// Best-effort removal of previously stored references. Failures are
    /// logged and swallowed; orphaned files are reconciled out-of-band.
    pub fn delete_refs(&self, refs: &[String]) {
        for reference in refs {
            let Some(file_name) = reference.rsplit('/').next() else {
                continue;
            };
            if file_name.is_empty() {
                continue;
            }
            let path = self.dir.join(file_name);
            if let Err(e) = std::fs::remove_file(&path) {
                warn!("Failed to delete stored image {}: {}", path.display(), e);
            }
        }
    }

    /// Read a stored image back for serving
    pub fn read(&self, file_name: &str) -> Result<(Vec<u8>, &'static str)> {
        // Reject anything that could escape the upload directory
        if file_name.contains('/') || file_name.contains('\\') || file_name.contains("..") {
            return Err(EtalaseError::validation("Invalid image file name"));
        }

        let path = self.dir.join(file_name);
        let bytes = std::fs::read(&path)
            .map_err(|_| EtalaseError::not_found(format!("Image not found: {}", file_name)))?;

        Ok((bytes, Self::content_type_for(file_name)))
    }

    fn content_type_for(file_name: &str) -> &'static str {
        match Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        }
    }

    /// Split a comma-joined reference string from the product row
    pub fn split_refs(joined: &str) -> Vec<String> {
        joined
            .split(',')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn join_refs(refs: &[String]) -> String {
        refs.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (ImageStore, TempDir) {
        let td = TempDir::new().unwrap();
        let config = UploadConfig {
            dir: td.path().to_string_lossy().to_string(),
            public_base_url: "http://localhost:5000/".to_string(),
            max_file_bytes: 1024,
        };
        (ImageStore::new(&config).unwrap(), td)
    }

    #[test]
    fn test_store_and_read_round_trip() {
        let (store, td) = temp_store();
        let src = td.path().join("upload.png");
        std::fs::write(&src, b"fake-png").unwrap();

        let url = store.store("photo.png", &src).unwrap();
        assert!(url.starts_with("http://localhost:5000/images/"));
        assert!(url.ends_with(".png"));

        let file_name = url.rsplit('/').next().unwrap();
        let (bytes, mime) = store.read(file_name).unwrap();
        assert_eq!(bytes, b"fake-png");
        assert_eq!(mime, "image/png");
    }

    #[test]
    fn test_store_rejects_unknown_extension() {
        let (store, td) = temp_store();
        let src = td.path().join("payload.exe");
        std::fs::write(&src, b"nope").unwrap();
        assert!(store.store("payload.exe", &src).is_err());
    }

    #[test]
    fn test_read_rejects_traversal() {
        let (store, _td) = temp_store();
        assert!(store.read("../secret.png").is_err());
    }

    #[test]
    fn test_delete_refs_is_best_effort() {
        let (store, td) = temp_store();
        let src = td.path().join("up.jpg");
        std::fs::write(&src, b"x").unwrap();
        let url = store.store("up.jpg", &src).unwrap();
        let missing = "http://localhost:5000/images/never-existed.png".to_string();

        // One real file, one missing; neither panics nor errors
        store.delete_refs(&[url.clone(), missing]);
        let file_name = url.rsplit('/').next().unwrap();
        assert!(store.read(file_name).is_err());
    }

    #[test]
    fn test_split_and_join_refs() {
        let joined = "http://x/images/a.png,http://x/images/b.jpg";
        let refs = ImageStore::split_refs(joined);
        assert_eq!(refs.len(), 2);
        assert_eq!(ImageStore::join_refs(&refs), joined);
        assert!(ImageStore::split_refs("").is_empty());
    }
}
