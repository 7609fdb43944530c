use async_trait::async_trait;
use sqlx::PgPool;

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn count_by_user_id(&self, user_id: i64) -> Result<i64, DomainError> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM posts WHERE user_id = $1"#)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(count)
    }
}
