use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use kernel::storage::{ImageStorage, StoredImage};
use shared::{config::StorageConfig, error::AppError, error::AppResult};

/// Image storage backed by a local directory. Files are served under a
/// public base URL by the HTTP layer; names are derived from the upload
/// timestamp so they never collide with user input.
pub struct LocalImageStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalImageStorage {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: PathBuf::from(&config.root),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn save(&self, dir: &str, content: Vec<u8>, extension: &str) -> AppResult<StoredImage> {
        let file_name = format!("{}.{}", Utc::now().timestamp_millis(), extension);
        let dir_path = self.root.join(dir);

        tokio::fs::create_dir_all(&dir_path)
            .await
            .map_err(AppError::StorageError)?;
        tokio::fs::write(dir_path.join(&file_name), content)
            .await
            .map_err(AppError::StorageError)?;

        Ok(StoredImage {
            url: format!("{}/{}/{}", self.public_base_url, dir, file_name),
            file_name,
        })
    }

    async fn delete(&self, dir: &str, file_name: &str) -> AppResult<()> {
        match tokio::fs::remove_file(self.root.join(dir).join(file_name)).await {
            Ok(()) => Ok(()),
            // Compensating deletes tolerate an already-missing file.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::StorageError(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_storage() -> (LocalImageStorage, PathBuf) {
        let root = std::env::temp_dir().join(format!("boarding-finder-{}", uuid::Uuid::new_v4()));
        let storage = LocalImageStorage::new(&StorageConfig {
            root: root.to_string_lossy().into_owned(),
            public_base_url: "http://localhost:8080/uploads/".into(),
        });
        (storage, root)
    }

    #[tokio::test]
    async fn save_then_delete_round_trip() {
        let (storage, root) = test_storage();

        let stored = storage
            .save("post_images", b"not really a jpg".to_vec(), "jpg")
            .await
            .unwrap();
        assert!(stored
            .url
            .starts_with("http://localhost:8080/uploads/post_images/"));
        assert!(root.join("post_images").join(&stored.file_name).exists());

        storage
            .delete("post_images", &stored.file_name)
            .await
            .unwrap();
        assert!(!root.join("post_images").join(&stored.file_name).exists());

        tokio::fs::remove_dir_all(root).await.ok();
    }

    #[tokio::test]
    async fn delete_of_missing_file_is_not_an_error() {
        let (storage, root) = test_storage();
        storage.delete("post_images", "nope.jpg").await.unwrap();
        tokio::fs::remove_dir_all(root).await.ok();
    }
}
