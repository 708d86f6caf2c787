//! Credential service: password hashing, login and session tokens.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use confessly_common::{
    AppError, AppResult,
    config::{AdminSeedConfig, AuthConfig},
};
use confessly_db::{
    entities::user::{self, Role},
    repositories::UserRepository,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Session token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i32,
    pub username: String,
    pub role: Role,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Input for registering a user.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 64))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Input for logging in.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Credential service.
#[derive(Clone)]
pub struct CredentialService {
    user_repo: UserRepository,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_hours: i64,
}

impl CredentialService {
    /// Create a new credential service.
    #[must_use]
    pub fn new(user_repo: UserRepository, config: &AuthConfig) -> Self {
        Self {
            user_repo,
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            token_ttl_hours: config.token_ttl_hours,
        }
    }

    /// Register a new user with the `user` role.
    pub async fn register(&self, input: RegisterInput) -> AppResult<user::Model> {
        input.validate()?;

        if self
            .user_repo
            .find_by_username_or_email(&input.username, &input.email)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists("user".to_string()));
        }

        let password_hash = hash_password(&input.password)?;

        let user = self
            .user_repo
            .create(user::ActiveModel {
                username: Set(input.username),
                email: Set(input.email),
                role: Set(Role::User),
                password: Set(password_hash),
                banned: Set(false),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Check a username/password pair.
    ///
    /// The ban flag is checked before the password, so a banned account is
    /// refused whatever password was supplied.
    pub async fn authenticate(&self, input: &LoginInput) -> AppResult<user::Model> {
        input.validate()?;

        let user = self
            .user_repo
            .find_by_username(&input.username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if user.banned {
            return Err(AppError::UserBanned);
        }

        if !verify_password(&input.password, &user.password)? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Log in and return a signed session token.
    pub async fn login(&self, input: LoginInput) -> AppResult<String> {
        let user = self.authenticate(&input).await?;
        tracing::debug!(user_id = user.id, "User logged in");
        self.issue_token(&user)
    }

    /// Sign a session token for `user`.
    pub fn issue_token(&self, user: &user::Model) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = Duration::try_hours(self.token_ttl_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AppError::Config("token lifetime is out of range".to_string()))?;
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Verify a session token and return its claims.
    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);

        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected session token");
                AppError::InvalidToken("invalid or expired token".to_string())
            })
    }

    /// Create the configured administrator if no user holds that username.
    pub async fn ensure_admin(&self, seed: &AdminSeedConfig) -> AppResult<()> {
        if self.user_repo.find_by_username(&seed.username).await?.is_some() {
            return Ok(());
        }

        let admin = self
            .user_repo
            .create(user::ActiveModel {
                username: Set(seed.username.clone()),
                email: Set(seed.email.clone()),
                role: Set(Role::Admin),
                password: Set(hash_password(&seed.password)?),
                banned: Set(false),
                created_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .await?;

        tracing::info!(user_id = admin.id, username = %admin.username, "Seeded administrator");
        Ok(())
    }
}

/// Hash a password with Argon2id and a random salt.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
