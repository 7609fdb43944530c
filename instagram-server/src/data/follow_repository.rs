use async_trait::async_trait;

use crate::domain::error::DomainError;

/// Directed follow edges, `follower_id -> following_id`.
#[async_trait]
pub(crate) trait FollowRepository: Send + Sync {
    /// Number of users following `user_id`.
    async fn count_by_following_id(&self, user_id: i64) -> Result<i64, DomainError>;
    /// Number of users `user_id` follows.
    async fn count_by_follower_id(&self, user_id: i64) -> Result<i64, DomainError>;
}
