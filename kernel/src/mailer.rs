use async_trait::async_trait;
use shared::error::AppResult;

/// Outbound notification collaborator. Callers dispatch fire-and-forget;
/// a failed send never affects the request that triggered it.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}
