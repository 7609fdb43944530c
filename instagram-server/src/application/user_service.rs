use std::sync::Arc;

use tracing::{info, warn};

use crate::application::responses::{ProfileResponse, UserResponse};
use crate::data::file_storage::{FileStorage, ImageUpload, PUBLIC_UPLOAD_PREFIX};
use crate::data::follow_repository::FollowRepository;
use crate::data::post_repository::PostRepository;
use crate::data::user_repository::{NewUser, ProfilePatch, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{ProfileUpdateRequest, RegisterRequest, Role, User};
use crate::infrastructure::password::PasswordService;

pub(crate) struct UserService {
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
    posts: Arc<dyn PostRepository>,
    files: Arc<dyn FileStorage>,
    passwords: PasswordService,
}

impl UserService {
    pub(crate) fn new(
        users: Arc<dyn UserRepository>,
        follows: Arc<dyn FollowRepository>,
        posts: Arc<dyn PostRepository>,
        files: Arc<dyn FileStorage>,
        passwords: PasswordService,
    ) -> Self {
        Self {
            users,
            follows,
            posts,
            files,
            passwords,
        }
    }

    /// Duplicate usernames are rejected by the store, not pre-checked here.
    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<User, DomainError> {
        let req = req.validate()?;
        let password_hash = self.passwords.hash(&req.password)?;

        let new_user = NewUser {
            username: req.username,
            email: req.email,
            name: req.name,
            password_hash,
            role: Role::User,
        };
        let user = self.users.create_user(new_user).await?;

        info!(user_id = user.id, username = %user.username, "user registered");
        Ok(user)
    }

    pub(crate) async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        self.users.exists_by_username(username.trim()).await
    }

    pub(crate) async fn find_by_id(&self, user_id: i64) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)
    }

    pub(crate) async fn find_by_username(&self, username: &str) -> Result<User, DomainError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or(DomainError::UserNotFound)
    }

    /// Counts are read independently and may drift from each other under
    /// concurrent writes.
    pub(crate) async fn get_profile(&self, username: &str) -> Result<ProfileResponse, DomainError> {
        let user = self.find_by_username(username).await?;

        let post_count = self.posts.count_by_user_id(user.id).await?;
        let follower_count = self.follows.count_by_following_id(user.id).await?;
        let following_count = self.follows.count_by_follower_id(user.id).await?;

        Ok(ProfileResponse::with_counts(
            &user,
            post_count,
            follower_count,
            following_count,
        ))
    }

    pub(crate) async fn get_user_by_id(&self, user_id: i64) -> Result<UserResponse, DomainError> {
        let user = self.find_by_id(user_id).await?;
        Ok(UserResponse::from(user))
    }

    /// Overwrites name and bio, and replaces the image when a non-empty
    /// upload is given. A stored upload is removed again if the write fails.
    pub(crate) async fn update_profile(
        &self,
        user_id: i64,
        req: ProfileUpdateRequest,
        profile_img: Option<ImageUpload>,
    ) -> Result<(), DomainError> {
        let req = req.validate()?;
        let user = self.find_by_id(user_id).await?;

        let stored_file = match profile_img.filter(|img| !img.is_empty()) {
            Some(img) => Some(self.files.save_file(&img).await?),
            None => None,
        };

        let patch = ProfilePatch {
            name: req.name,
            bio: req.bio,
            profile_image: stored_file
                .as_deref()
                .map(|file_name| format!("{PUBLIC_UPLOAD_PREFIX}/{file_name}")),
        };

        let result = self
            .users
            .update_profile(user.id, patch)
            .await
            .and_then(|updated| updated.ok_or(DomainError::UserNotFound));

        if let Err(err) = &result
            && let Some(file_name) = &stored_file
        {
            warn!(user_id, error = %err, "profile update failed, discarding upload");
            if let Err(cleanup_err) = self.files.remove_file(file_name).await {
                warn!(file_name = %file_name, error = %cleanup_err, "failed to remove orphaned upload");
            }
        }

        let updated = result?;
        info!(
            user_id = updated.id,
            image_changed = stored_file.is_some(),
            "profile updated"
        );
        Ok(())
    }

    /// A blank keyword matches nobody.
    pub(crate) async fn search_users(&self, keyword: &str) -> Result<Vec<UserResponse>, DomainError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }

        let users = self.users.search_by_keyword(keyword).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }
}
