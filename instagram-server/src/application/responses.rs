use chrono::{DateTime, Utc};

use crate::domain::user::User;

/// A user's profile header: identity plus post/follower/following counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProfileResponse {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) bio: Option<String>,
    pub(crate) name: String,
    pub(crate) post_count: i64,
    pub(crate) follower_count: i64,
    pub(crate) following_count: i64,
}

impl ProfileResponse {
    /// All counts zero.
    pub(crate) fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            bio: user.bio.clone(),
            name: user.name.clone(),
            post_count: 0,
            follower_count: 0,
            following_count: 0,
        }
    }

    pub(crate) fn with_counts(
        user: &User,
        post_count: i64,
        follower_count: i64,
        following_count: i64,
    ) -> Self {
        Self {
            post_count,
            follower_count,
            following_count,
            ..Self::from_user(user)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UserResponse {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) name: String,
    pub(crate) bio: Option<String>,
    pub(crate) profile_image: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
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

#[cfg(test)]
mod tests {
    use super::{ProfileResponse, UserResponse};
    use crate::testing::sample_user;

    #[test]
    fn profile_from_user_defaults_counts_to_zero() {
        let user = sample_user(3, "alice");
        let profile = ProfileResponse::from_user(&user);

        assert_eq!(profile.id, 3);
        assert_eq!(profile.username, "alice");
        assert_eq!(profile.name, user.name);
        assert_eq!(profile.bio, user.bio);
        assert_eq!(
            (profile.post_count, profile.follower_count, profile.following_count),
            (0, 0, 0)
        );
    }

    #[test]
    fn user_response_maps_display_fields() {
        let mut user = sample_user(4, "bob");
        user.profile_image = Some("/uploads/a.png".to_string());

        let response = UserResponse::from(user.clone());
        assert_eq!(response.id, 4);
        assert_eq!(response.username, "bob");
        assert_eq!(response.name, user.name);
        assert_eq!(response.bio, user.bio);
        assert_eq!(response.profile_image.as_deref(), Some("/uploads/a.png"));
        assert_eq!(response.created_at, user.created_at);
    }
}
