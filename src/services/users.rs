//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{LoginUser, RegisterUser, User, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new user and issue a token for it
    pub async fn register(&self, data: RegisterUser) -> AppResult<(String, User)> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.users.email_exists(&data.email).await? {
            return Err(AppError::Validation("Email already registered".to_string()));
        }

        let password_hash = self.hash_password(&data.password)?;
        let role = data.role.as_deref().unwrap_or("Standard User");
        let user = self
            .repository
            .users
            .create(&data.name, &data.email, &password_hash, role, false)
            .await?;

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Authenticate by email and password, returning a token and the user
    pub async fn authenticate(&self, data: &LoginUser) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_email(&data.email)
            .await?
            .ok_or_else(|| {
                AppError::Authentication("Incorrect email or password".to_string())
            })?;

        if !self.verify_password(&user, &data.password)? {
            return Err(AppError::Authentication(
                "Incorrect email or password".to_string(),
            ));
        }

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Create a user on behalf of an administrator
    pub async fn create_user(&self, data: RegisterUser) -> AppResult<User> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.users.email_exists(&data.email).await? {
            return Err(AppError::Validation("Email already registered".to_string()));
        }

        let password_hash = self.hash_password(&data.password)?;
        let role = data.role.as_deref().unwrap_or("Standard User");
        self.repository
            .users
            .create(
                &data.name,
                &data.email,
                &password_hash,
                role,
                data.is_admin.unwrap_or(false),
            )
            .await
    }

    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<User>> {
        self.repository.users.list(skip, limit).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Create a JWT token for the given user
    pub fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            is_admin: user.is_admin,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
