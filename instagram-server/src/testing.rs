//! In-memory fakes of the repository traits, shared by unit and router tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::data::file_storage::{FileStorage, ImageUpload};
use crate::data::follow_repository::FollowRepository;
use crate::data::post_repository::PostRepository;
use crate::data::user_repository::{NewUser, ProfilePatch, UserCredentials, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{Role, User};

pub(crate) fn sample_user(id: i64, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        name: format!("{username} name"),
        bio: Some(format!("{username} bio")),
        profile_image: None,
        role: Role::User,
        created_at: Utc::now(),
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeUserRepo {
    rows: Arc<Mutex<Vec<UserCredentials>>>,
    fail_updates: Arc<Mutex<bool>>,
    update_calls: Arc<Mutex<Vec<(i64, ProfilePatch)>>>,
}

impl FakeUserRepo {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, user: User, password_hash: &str) {
        self.rows
            .lock()
            .expect("rows mutex poisoned")
            .push(UserCredentials {
                user,
                password_hash: password_hash.to_string(),
            });
    }

    pub(crate) fn get(&self, id: i64) -> Option<UserCredentials> {
        self.rows
            .lock()
            .expect("rows mutex poisoned")
            .iter()
            .find(|row| row.user.id == id)
            .cloned()
    }

    pub(crate) fn fail_updates(&self) {
        *self.fail_updates.lock().expect("fail_updates mutex poisoned") = true;
    }

    pub(crate) fn update_calls(&self) -> Vec<(i64, ProfilePatch)> {
        self.update_calls
            .lock()
            .expect("update_calls mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl UserRepository for FakeUserRepo {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let mut rows = self.rows.lock().expect("rows mutex poisoned");
        if rows
            .iter()
            .any(|row| row.user.username.eq_ignore_ascii_case(&input.username))
        {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }
        if rows.iter().any(|row| row.user.email == input.email) {
            return Err(DomainError::AlreadyExists("email".to_string()));
        }
        let id = rows.iter().map(|row| row.user.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            username: input.username,
            email: input.email,
            name: input.name,
            bio: None,
            profile_image: None,
            role: input.role,
            created_at: Utc::now(),
        };
        rows.push(UserCredentials {
            user: user.clone(),
            password_hash: input.password_hash,
        });
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        Ok(self.get(id).map(|row| row.user))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .find_credentials_by_username(username)
            .await?
            .map(|row| row.user))
    }

    async fn find_credentials_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        Ok(self
            .rows
            .lock()
            .expect("rows mutex poisoned")
            .iter()
            .find(|row| row.user.username == username)
            .cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self
            .rows
            .lock()
            .expect("rows mutex poisoned")
            .iter()
            .any(|row| row.user.username.eq_ignore_ascii_case(username)))
    }

    async fn search_by_keyword(&self, keyword: &str) -> Result<Vec<User>, DomainError> {
        let keyword = keyword.to_lowercase();
        let mut found: Vec<User> = self
            .rows
            .lock()
            .expect("rows mutex poisoned")
            .iter()
            .map(|row| row.user.clone())
            .filter(|user| {
                user.username.to_lowercase().contains(&keyword)
                    || user.name.to_lowercase().contains(&keyword)
            })
            .collect();
        found.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(found)
    }

    async fn update_profile(
        &self,
        id: i64,
        patch: ProfilePatch,
    ) -> Result<Option<User>, DomainError> {
        self.update_calls
            .lock()
            .expect("update_calls mutex poisoned")
            .push((id, patch.clone()));
        if *self.fail_updates.lock().expect("fail_updates mutex poisoned") {
            return Err(DomainError::Unexpected("database unavailable".to_string()));
        }

        let mut rows = self.rows.lock().expect("rows mutex poisoned");
        let Some(row) = rows.iter_mut().find(|row| row.user.id == id) else {
            return Ok(None);
        };
        row.user.name = patch.name;
        row.user.bio = patch.bio;
        if let Some(image) = patch.profile_image {
            row.user.profile_image = Some(image);
        }
        Ok(Some(row.user.clone()))
    }
}

/// Serves both count stores from fixed per-user numbers.
#[derive(Clone, Default)]
pub(crate) struct FakeCounts {
    posts: Arc<Mutex<HashMap<i64, i64>>>,
    followers: Arc<Mutex<HashMap<i64, i64>>>,
    following: Arc<Mutex<HashMap<i64, i64>>>,
    calls: Arc<Mutex<usize>>,
}

impl FakeCounts {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(&self, user_id: i64, posts: i64, followers: i64, following: i64) {
        self.posts
            .lock()
            .expect("posts mutex poisoned")
            .insert(user_id, posts);
        self.followers
            .lock()
            .expect("followers mutex poisoned")
            .insert(user_id, followers);
        self.following
            .lock()
            .expect("following mutex poisoned")
            .insert(user_id, following);
    }

    pub(crate) fn calls(&self) -> usize {
        *self.calls.lock().expect("calls mutex poisoned")
    }

    fn lookup(&self, table: &Mutex<HashMap<i64, i64>>, user_id: i64) -> i64 {
        *self.calls.lock().expect("calls mutex poisoned") += 1;
        table
            .lock()
            .expect("count mutex poisoned")
            .get(&user_id)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl PostRepository for FakeCounts {
    async fn count_by_user_id(&self, user_id: i64) -> Result<i64, DomainError> {
        Ok(self.lookup(&self.posts, user_id))
    }
}

#[async_trait]
impl FollowRepository for FakeCounts {
    async fn count_by_following_id(&self, user_id: i64) -> Result<i64, DomainError> {
        Ok(self.lookup(&self.followers, user_id))
    }

    async fn count_by_follower_id(&self, user_id: i64) -> Result<i64, DomainError> {
        Ok(self.lookup(&self.following, user_id))
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeFileStorage {
    saved: Arc<Mutex<Vec<String>>>,
    removed: Arc<Mutex<Vec<String>>>,
}

impl FakeFileStorage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn saved(&self) -> Vec<String> {
        self.saved.lock().expect("saved mutex poisoned").clone()
    }

    pub(crate) fn removed(&self) -> Vec<String> {
        self.removed.lock().expect("removed mutex poisoned").clone()
    }
}

#[async_trait]
impl FileStorage for FakeFileStorage {
    async fn save_file(&self, upload: &ImageUpload) -> Result<String, DomainError> {
        assert!(!upload.is_empty(), "save_file must never see an empty upload");
        let mut saved = self.saved.lock().expect("saved mutex poisoned");
        let name = format!("stored-{}.png", saved.len() + 1);
        saved.push(name.clone());
        Ok(name)
    }

    async fn remove_file(&self, file_name: &str) -> Result<(), DomainError> {
        self.removed
            .lock()
            .expect("removed mutex poisoned")
            .push(file_name.to_string());
        Ok(())
    }
}
