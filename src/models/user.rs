//! User model and JWT claims

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::AppError;

/// User roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Employee,
    Admin,
}

impl std::str::FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(Role::Employee),
            "admin" => Ok(Role::Admin),
            other => Err(AppError::Internal(format!("Unknown role '{}'", other))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Employee => write!(f, "employee"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// User model from database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Public user representation
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub role: Role,
}

/// JWT claims carried by every authenticated call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// User ID
    pub sub: i32,
    pub username: String,
    pub role: Role,
    /// Expiration (unix seconds)
    pub exp: i64,
}

impl UserClaims {
    pub fn new(user_id: i32, username: String, role: Role, expiration_hours: u64) -> Self {
        let exp = Utc::now() + chrono::Duration::hours(expiration_hours as i64);
        Self {
            sub: user_id,
            username,
            role,
            exp: exp.timestamp(),
        }
    }

    /// Sign the claims into a bearer token
    pub fn to_token(&self, secret: &str) -> Result<String, AppError> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Decode and validate a bearer token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, AppError> {
        decode::<UserClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| AppError::Authentication(format!("Invalid token: {}", e)))
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Permission("Administrator rights required".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_roundtrip_through_token() {
        let claims = UserClaims::new(7, "alice".to_string(), Role::Admin, 1);
        let token = claims.to_token("test-secret").unwrap();
        let decoded = UserClaims::from_token(&token, "test-secret").unwrap();
        assert_eq!(decoded.sub, 7);
        assert_eq!(decoded.username, "alice");
        assert!(decoded.is_admin());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = UserClaims::new(7, "alice".to_string(), Role::Employee, 1);
        let token = claims.to_token("test-secret").unwrap();
        assert!(UserClaims::from_token(&token, "other-secret").is_err());
    }

    #[test]
    fn employee_is_not_admin() {
        let claims = UserClaims::new(3, "bob".to_string(), Role::Employee, 1);
        assert!(claims.require_admin().is_err());
    }
}
