use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::responses::{ProfileResponse, UserResponse};
use crate::data::file_storage::ImageUpload;
use crate::domain::user::{ProfileUpdateRequest, User};
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::extract::{ApiMultipart, ApiPath, ApiQuery};
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) name: String,
    pub(crate) bio: Option<String>,
    pub(crate) profile_image: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<UserResponse> for UserDto {
    fn from(user: UserResponse) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            bio: user.bio,
            profile_image: user.profile_image,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserResponse::from(user).into()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ProfileDto {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) name: String,
    pub(crate) bio: Option<String>,
    pub(crate) post_count: i64,
    pub(crate) follower_count: i64,
    pub(crate) following_count: i64,
    /// True when the caller is looking at their own profile.
    pub(crate) is_own_profile: bool,
}

impl ProfileDto {
    fn new(profile: ProfileResponse, viewer: Option<&AuthenticatedUser>) -> Self {
        let is_own_profile = viewer.is_some_and(|viewer| viewer.user_id == profile.id);
        Self {
            id: profile.id,
            username: profile.username,
            name: profile.name,
            bio: profile.bio,
            post_count: profile.post_count,
            follower_count: profile.follower_count,
            following_count: profile.following_count,
            is_own_profile,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UsernameQuery {
    pub(crate) username: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UsernameExistsDto {
    pub(crate) username: String,
    pub(crate) exists: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchQuery {
    pub(crate) keyword: Option<String>,
}

/// Documents the multipart body of the profile update endpoint.
#[allow(dead_code)]
#[derive(ToSchema)]
pub(crate) struct ProfileUpdateForm {
    pub(crate) name: String,
    pub(crate) bio: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub(crate) profile_img: Option<Vec<u8>>,
}

#[utoipa::path(
    get,
    path = "/api/users/exists",
    tag = "users",
    params(
        ("username" = String, Query, description = "Username to check")
    ),
    responses(
        (status = 200, description = "Existence checked", body = UsernameExistsDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn username_exists(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UsernameQuery>,
) -> AppResult<(StatusCode, Json<UsernameExistsDto>)> {
    let exists = state
        .user_service
        .exists_by_username(&query.username)
        .await?;

    Ok((
        StatusCode::OK,
        Json(UsernameExistsDto {
            username: query.username,
            exists,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/users/search",
    tag = "users",
    params(
        ("keyword" = Option<String>, Query, description = "Substring of username or name")
    ),
    responses(
        (status = 200, description = "Matching users, possibly empty", body = [UserDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn search_users(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> AppResult<(StatusCode, Json<Vec<UserDto>>)> {
    let keyword = query.keyword.unwrap_or_default();
    let users = state.user_service.search_users(&keyword).await?;

    Ok((
        StatusCode::OK,
        Json(users.into_iter().map(UserDto::from).collect()),
    ))
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Current user", body = UserDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn me(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    let user = state.user_service.get_user_by_id(auth.user_id).await?;
    Ok((StatusCode::OK, Json(UserDto::from(user))))
}

#[utoipa::path(
    put,
    path = "/api/users/me/profile",
    tag = "users",
    security(
        ("bearer_auth" = [])
    ),
    request_body(content = ProfileUpdateForm, content_type = "multipart/form-data"),
    responses(
        (status = 204, description = "Profile updated"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    ApiMultipart(mut multipart): ApiMultipart,
) -> AppResult<StatusCode> {
    let mut name = None;
    let mut bio = None;
    let mut profile_img = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => name = Some(field.text().await?),
            Some("bio") => bio = Some(field.text().await?),
            Some("profile_img") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                profile_img = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| AppError::BadRequest("missing field 'name'".to_string()))?;
    let req = ProfileUpdateRequest { name, bio };

    state
        .user_service
        .update_profile(auth.user_id, req, profile_img)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/users/{username}",
    tag = "users",
    security(
        (),
        ("bearer_auth" = [])
    ),
    params(
        ("username" = String, Path, description = "Profile owner")
    ),
    responses(
        (status = 200, description = "Profile with counts", body = ProfileDto),
        (status = 401, description = "Invalid token"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_profile(
    State(state): State<AppState>,
    viewer: Option<AuthenticatedUser>,
    ApiPath(username): ApiPath<String>,
) -> AppResult<(StatusCode, Json<ProfileDto>)> {
    let profile = state.user_service.get_profile(&username).await?;
    Ok((
        StatusCode::OK,
        Json(ProfileDto::new(profile, viewer.as_ref())),
    ))
}
