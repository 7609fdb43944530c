use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::user_repository::{NewUser, ProfilePatch, UserCredentials, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::User;

const SEARCH_LIMIT: i64 = 50;

#[derive(Debug, Clone)]
pub(crate) struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    name: String,
    bio: Option<String>,
    profile_image: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct UserCredentialsRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            username: row.username,
            email: row.email,
            name: row.name,
            bio: row.bio,
            profile_image: row.profile_image,
            role: row.role.parse()?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_user_db_error)?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, name, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, name, bio, profile_image, role, created_at
            "#,
        )
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.name)
        .bind(&input.password_hash)
        .bind(input.role.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_user_db_error)?;

        tx.commit().await.map_err(map_user_db_error)?;

        User::try_from(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, name, bio, profile_image, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, name, bio, profile_image, role, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        row.map(User::try_from).transpose()
    }

    async fn find_credentials_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(
            r#"
            SELECT id, username, email, name, bio, profile_image, role, created_at, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        if let Some(r) = row {
            Ok(Some(UserCredentials {
                user: User::try_from(r.user)?,
                password_hash: r.password_hash,
            }))
        } else {
            Ok(None)
        }
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar(
            r#"SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(username) = LOWER($1))"#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(exists)
    }

    async fn search_by_keyword(&self, keyword: &str) -> Result<Vec<User>, DomainError> {
        let pattern = format!("%{}%", escape_like(keyword));

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, name, bio, profile_image, role, created_at
            FROM users
            WHERE username ILIKE $1 ESCAPE '\'
               OR name ILIKE $1 ESCAPE '\'
            ORDER BY username
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(SEARCH_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update_profile(
        &self,
        id: i64,
        patch: ProfilePatch,
    ) -> Result<Option<User>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_user_db_error)?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET name = $2,
                bio = $3,
                profile_image = COALESCE($4, profile_image),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, name, bio, profile_image, role, created_at
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.bio)
        .bind(&patch.profile_image)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_user_db_error)?;

        tx.commit().await.map_err(map_user_db_error)?;

        row.map(User::try_from).transpose()
    }
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn map_user_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23505")
    {
        let resource = match db_err.constraint() {
            Some("users_username_key" | "users_username_lower_key") => "username",
            Some("users_email_key") => "email",
            _ => "user",
        };
        return DomainError::AlreadyExists(resource.to_string());
    }
    DomainError::Unexpected(err.to_string())
}
