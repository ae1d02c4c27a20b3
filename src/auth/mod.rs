//! Authentication and authorization.
//!
//! Credential verification (argon2), HS256 access token issuance and
//! validation, and role gating for the reception and F&B feature areas.
//! Every failure on the token path maps to the same "Could not validate
//! credentials" outcome so callers cannot probe which check failed.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::{
    entities::user::{self, UserRole},
    errors::ServiceError,
    AppState,
};

/// Uniform client-facing message for every token-path failure.
pub const CREDENTIALS_MESSAGE: &str = "Could not validate credentials";

/// Claim structure for access tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Expiration time
    pub exp: i64,
    /// Issued at time
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("token creation failed: {0}")]
    TokenCreation(String),
    #[error("password hashing failed: {0}")]
    Hash(String),
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken => ServiceError::Unauthorized(CREDENTIALS_MESSAGE.to_string()),
            AuthError::TokenCreation(msg) | AuthError::Hash(msg) => {
                ServiceError::InternalError(msg)
            }
        }
    }
}

/// Authentication configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_expiration: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: String, access_token_expiration: Duration) -> Self {
        Self {
            jwt_secret,
            access_token_expiration,
        }
    }
}

/// Issues and validates access tokens and password hashes.
#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hash(e.to_string()))
    }

    pub fn verify_password(&self, password: &str, password_hash: &str) -> bool {
        PasswordHash::new(password_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    /// Generate an access token for a username. Returns the token and
    /// its lifetime in seconds.
    pub fn generate_token(&self, username: &str) -> Result<(String, i64), AuthError> {
        let now = Utc::now();
        let expires_in = self.config.access_token_expiration.as_secs() as i64;
        let claims = Claims {
            sub: username.to_string(),
            exp: now.timestamp() + expires_in,
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenCreation(e.to_string()))?;

        Ok((token, expires_in))
    }

    /// Validate a token and extract its claims. Expired and malformed
    /// tokens are indistinguishable to the caller.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            debug!("token validation failed: {}", e);
            AuthError::InvalidToken
        })
    }
}

/// Resolve a bearer token to its user row. Rejects unknown subjects with
/// the uniform credentials error and inactive accounts with a 400.
pub async fn resolve_user(
    auth: &AuthService,
    db: &DatabaseConnection,
    token: &str,
) -> Result<user::Model, ServiceError> {
    let claims = auth.validate_token(token)?;

    let user = user::Entity::find()
        .filter(user::Column::Username.eq(&claims.sub))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::Unauthorized(CREDENTIALS_MESSAGE.to_string()))?;

    if !user.is_active {
        return Err(ServiceError::BadRequest("Inactive user".to_string()));
    }

    Ok(user)
}

/// The authenticated staff member for the current request.
///
/// Extracting it validates the `Authorization: Bearer` header and loads
/// the user row, so handlers receive a live, active account.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub user::Model);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let state = AppState::from_ref(state);

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .ok_or_else(|| ServiceError::Unauthorized(CREDENTIALS_MESSAGE.to_string()))?;

        let user = resolve_user(&state.auth, &state.db, token).await?;
        let current = CurrentUser(user);
        parts.extensions.insert(current.clone());
        Ok(current)
    }
}

/// Roles that may use reception features (rooms, reservations, guests).
pub const RECEPTION_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Receptionist];
/// Roles that may use F&B features (outlets, menus, orders, payments).
pub const CASHIER_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Cashier];

fn role_name(role: UserRole) -> &'static str {
    match role {
        UserRole::Admin => "admin",
        UserRole::Receptionist => "receptionist",
        UserRole::Cashier => "cashier",
    }
}

/// Check the resolved identity against a required role set; fails with
/// an authorization error naming the accepted roles.
pub fn require_roles(user: &user::Model, required: &[UserRole]) -> Result<(), ServiceError> {
    if required.contains(&user.role) {
        return Ok(());
    }
    let names: Vec<&str> = required.iter().copied().map(role_name).collect();
    Err(ServiceError::Forbidden(format!(
        "Operation requires one of these roles: {}",
        names.join(", ")
    )))
}

/// Admin-only gate.
pub fn require_admin(user: &user::Model) -> Result<(), ServiceError> {
    if user.is_admin() {
        return Ok(());
    }
    Err(ServiceError::Forbidden(
        "Only administrators can perform this operation".to_string(),
    ))
}
