use axum::Router;
use axum::middleware;
use axum::routing::{get, put};

use crate::presentation::AppState;
use crate::presentation::handlers::users::{
    get_profile, me, search_users, update_profile, username_exists,
};
use crate::presentation::middleware::auth::{jwt_auth_middleware, optional_jwt_auth_middleware};

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/exists", get(username_exists))
        .route("/search", get(search_users));

    let profile = Router::new()
        .route("/{username}", get(get_profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            optional_jwt_auth_middleware,
        ));

    let protected = Router::new()
        .route("/me", get(me))
        .route("/me/profile", put(update_profile))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(profile).merge(protected)
}
