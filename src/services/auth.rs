//! Authentication service (login + token introspection)

use argon2::{Argon2, PasswordHash, PasswordVerifier};

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{Role, UserClaims, UserInfo},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Verify credentials and issue a signed token
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(String, UserInfo)> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await
            .map_err(|_| AppError::Authentication("Invalid username or password".to_string()))?;

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| AppError::Internal(format!("Corrupt password hash: {}", e)))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AppError::Authentication("Invalid username or password".to_string()))?;

        let role: Role = user.role.parse()?;
        let claims = UserClaims::new(
            user.id,
            user.username.clone(),
            role,
            self.config.jwt_expiration_hours,
        );
        let token = claims.to_token(&self.config.jwt_secret)?;

        Ok((
            token,
            UserInfo {
                id: user.id,
                username: user.username,
                display_name: user.display_name,
                role,
            },
        ))
    }

    /// Resolve the user behind a set of claims
    pub async fn me(&self, claims: &UserClaims) -> AppResult<UserInfo> {
        let user = self.repository.users.get_by_id(claims.sub).await?;
        Ok(UserInfo {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            role: user.role.parse()?,
        })
    }
}
