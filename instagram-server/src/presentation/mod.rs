use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::user_service::UserService;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod app_error;
pub(crate) mod extract;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) user_service: Arc<UserService>,
    pub(crate) auth_service: Arc<AuthService>,
    pub(crate) jwt: Arc<JwtService>,
}

impl AppState {
    pub(crate) fn new(
        user_service: Arc<UserService>,
        auth_service: Arc<AuthService>,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self {
            user_service,
            auth_service,
            jwt,
        }
    }
}
