use async_trait::async_trait;
use sqlx::PgPool;

use crate::data::follow_repository::FollowRepository;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresFollowRepository {
    pool: PgPool,
}

impl PostgresFollowRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn count_by_following_id(&self, user_id: i64) -> Result<i64, DomainError> {
        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM follows WHERE following_id = $1"#)
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_follow_db_error)?;

        Ok(count)
    }

    async fn count_by_follower_id(&self, user_id: i64) -> Result<i64, DomainError> {
        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM follows WHERE follower_id = $1"#)
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_follow_db_error)?;

        Ok(count)
    }
}

fn map_follow_db_error(err: sqlx::Error) -> DomainError {
    DomainError::Unexpected(err.to_string())
}
