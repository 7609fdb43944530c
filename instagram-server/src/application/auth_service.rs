use std::sync::Arc;

use tracing::debug;

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, User};
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::password::PasswordService;

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) access_token: String,
}

pub(crate) struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: PasswordService,
    jwt: Arc<JwtService>,
}

impl AuthService {
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    pub(crate) fn new(
        users: Arc<dyn UserRepository>,
        passwords: PasswordService,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self {
            users,
            passwords,
            jwt,
        }
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let user_creds = match self.users.find_credentials_by_username(&req.username).await? {
            Some(user_creds) => user_creds,
            None => {
                // keep the miss path about as slow as a real verification
                match self
                    .passwords
                    .verify(&req.password, Self::DUMMY_PASSWORD_HASH)
                {
                    Ok(()) | Err(DomainError::InvalidCredentials) => {}
                    Err(err) => return Err(err),
                }
                debug!(username = %req.username, "login for unknown user");
                return Err(DomainError::InvalidCredentials);
            }
        };

        self.passwords
            .verify(&req.password, &user_creds.password_hash)?;

        let access_token = self.issue_token(&user_creds.user)?;

        Ok(AuthResult {
            user: user_creds.user,
            access_token,
        })
    }

    pub(crate) fn issue_token(&self, user: &User) -> Result<String, DomainError> {
        self.jwt
            .generate_token(user.id, &user.username, user.role)
            .map_err(|err| DomainError::Unexpected(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::AuthService;
    use crate::domain::error::DomainError;
    use crate::domain::user::LoginRequest;
    use crate::infrastructure::jwt::JwtService;
    use crate::infrastructure::password::PasswordService;
    use crate::testing::{FakeUserRepo, sample_user};

    fn service(repo: &FakeUserRepo) -> AuthService {
        AuthService::new(Arc::new(repo.clone()), PasswordService::new(), test_jwt())
    }

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_missing_user() {
        let repo = FakeUserRepo::new();

        let err = service(&repo)
            .login(login("valid_user", "some-password"))
            .await
            .expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_wrong_password() {
        let repo = FakeUserRepo::new();
        let hash = PasswordService::new()
            .hash("correct-password")
            .expect("hash must be created");
        repo.insert(sample_user(1, "valid_user"), &hash);

        let err = service(&repo)
            .login(login("valid_user", "wrong-password"))
            .await
            .expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_returns_token_for_valid_credentials() {
        let repo = FakeUserRepo::new();
        let hash = PasswordService::new()
            .hash("correct-password")
            .expect("hash must be created");
        repo.insert(sample_user(1, "valid_user"), &hash);
        let jwt = test_jwt();
        let service = AuthService::new(Arc::new(repo), PasswordService::new(), jwt.clone());

        let result = service
            .login(login("  valid_user ", "correct-password"))
            .await
            .expect("login must succeed");

        assert_eq!(result.user.id, 1);
        let claims = jwt
            .verify_token(&result.access_token)
            .expect("token must verify");
        assert_eq!(claims.sub, 1);
        assert_eq!(claims.username, "valid_user");
    }

    fn test_jwt() -> Arc<JwtService> {
        Arc::new(JwtService::new("0123456789abcdef0123456789abcdef", 3600))
    }
}
