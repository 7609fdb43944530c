use async_trait::async_trait;

use crate::domain::error::DomainError;

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn count_by_user_id(&self, user_id: i64) -> Result<i64, DomainError>;
}
