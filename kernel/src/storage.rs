use async_trait::async_trait;
use shared::error::AppResult;

/// Stable reference returned by the file-storage collaborator.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub url: String,
    pub file_name: String,
}

/// Binary image storage. Writing happens before the listing transaction
/// begins; `delete` is the compensating action when that transaction
/// rolls back.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    async fn save(&self, dir: &str, content: Vec<u8>, extension: &str) -> AppResult<StoredImage>;
    async fn delete(&self, dir: &str, file_name: &str) -> AppResult<()>;
}
