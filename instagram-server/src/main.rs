use std::sync::Arc;

use anyhow::Result;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;
#[cfg(test)]
mod testing;

use application::auth_service::AuthService;
use application::user_service::UserService;
use data::repositories::postgres::follow_repository::PostgresFollowRepository;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use data::repositories::postgres::user_repository::PostgresUserRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::file_storage::LocalFileStorage;
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::password::PasswordService;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url, settings.database_max_connections).await?;
    run_migrations(&pool).await?;

    let users = Arc::new(PostgresUserRepository::new(pool.clone()));
    let follows = Arc::new(PostgresFollowRepository::new(pool.clone()));
    let posts = Arc::new(PostgresPostRepository::new(pool));
    let files = Arc::new(LocalFileStorage::new(
        &settings.upload_dir,
        settings.upload_max_bytes,
    ));
    let jwt = Arc::new(JwtService::new(
        &settings.jwt_secret,
        settings.jwt_ttl_seconds,
    ));

    let user_service = Arc::new(UserService::new(
        users.clone(),
        follows,
        posts,
        files.clone(),
        PasswordService::new(),
    ));
    let auth_service = Arc::new(AuthService::new(users, PasswordService::new(), jwt.clone()));

    let state = AppState::new(user_service, auth_service, jwt);

    info!(upload_dir = %files.root().display(), "serving uploads");
    server::run_http(&settings, state, files.root()).await
}
