//! User model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::AppError;

/// Full user model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Profile picture URL
    pub profile_picture: Option<String>,
    /// User role / job title
    pub role: String,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Basic user info for nested relationships (team members, leaders)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserBasic {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub profile_picture: Option<String>,
    pub role: String,
}

/// Registration / user creation request
#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
pub struct RegisterUser {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, max = 100, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// Role / job title (defaults to "Standard User")
    pub role: Option<String>,
    pub is_admin: Option<bool>,
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

/// User query parameters
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct UserQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// JWT claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub is_admin: bool,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Administrator privileges required".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        let now = Utc::now().timestamp();
        let claims = UserClaims {
            sub: "tech@example.com".to_string(),
            user_id: 7,
            is_admin: false,
            exp: now + 3600,
            iat: now,
        };
        let token = claims.create_token("secret").unwrap();
        let parsed = UserClaims::from_token(&token, "secret").unwrap();
        assert_eq!(parsed.user_id, 7);
        assert_eq!(parsed.sub, "tech@example.com");
        assert!(!parsed.is_admin);
    }

    #[test]
    fn token_rejects_wrong_secret() {
        let now = Utc::now().timestamp();
        let claims = UserClaims {
            sub: "tech@example.com".to_string(),
            user_id: 7,
            is_admin: false,
            exp: now + 3600,
            iat: now,
        };
        let token = claims.create_token("secret").unwrap();
        assert!(UserClaims::from_token(&token, "other-secret").is_err());
    }

    #[test]
    fn require_admin_checks_flag() {
        let now = Utc::now().timestamp();
        let mut claims = UserClaims {
            sub: "admin@example.com".to_string(),
            user_id: 1,
            is_admin: true,
            exp: now + 3600,
            iat: now,
        };
        assert!(claims.require_admin().is_ok());
        claims.is_admin = false;
        assert!(claims.require_admin().is_err());
    }
}
