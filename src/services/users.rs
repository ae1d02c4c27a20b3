use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::AuthService,
    entities::{
        audit_log::AuditAction,
        user::{self, UserRole},
    },
    errors::ServiceError,
    services::audit,
};

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_active: bool,
}

/// Staff account management and credential checks.
#[derive(Clone)]
pub struct UserService {
    db: Arc<DatabaseConnection>,
    auth: AuthService,
}

impl UserService {
    pub fn new(db: Arc<DatabaseConnection>, auth: AuthService) -> Self {
        Self { db, auth }
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&*self.db)
            .await?)
    }

    /// Verify credentials. Unknown usernames and wrong passwords produce
    /// the identical error so account existence never leaks; inactive
    /// accounts are rejected separately after the password check.
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<user::Model, ServiceError> {
        let invalid =
            || ServiceError::Unauthorized("Incorrect username or password".to_string());

        let user = match self.find_by_username(username).await? {
            Some(user) => user,
            None => {
                warn!(username, "login attempt with unknown username");
                return Err(invalid());
            }
        };

        if !self.auth.verify_password(password, &user.password_hash) {
            warn!(username, "failed login attempt");
            return Err(invalid());
        }

        if !user.is_active {
            warn!(username, "login attempt by inactive user");
            return Err(ServiceError::BadRequest("Inactive user".to_string()));
        }

        info!(username, "successful login");
        Ok(user)
    }

    /// Create a staff account. Username and email must be unique.
    #[instrument(skip(self, input))]
    pub async fn register(
        &self,
        input: RegisterUser,
        created_by: Option<Uuid>,
    ) -> Result<user::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let username_taken = user::Entity::find()
            .filter(user::Column::Username.eq(&input.username))
            .one(&txn)
            .await?
            .is_some();
        if username_taken {
            return Err(ServiceError::BadRequest(
                "Username already registered".to_string(),
            ));
        }

        let email_taken = user::Entity::find()
            .filter(user::Column::Email.eq(&input.email))
            .one(&txn)
            .await?
            .is_some();
        if email_taken {
            return Err(ServiceError::BadRequest(
                "Email already registered".to_string(),
            ));
        }

        let now = Utc::now();
        let id = Uuid::new_v4();
        let model = user::ActiveModel {
            id: Set(id),
            username: Set(input.username.clone()),
            email: Set(input.email),
            password_hash: Set(self.auth.hash_password(&input.password)?),
            full_name: Set(input.full_name),
            role: Set(input.role),
            is_active: Set(input.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        audit::record(
            &txn,
            "users",
            id,
            AuditAction::Insert,
            None,
            Some(json!({ "username": model.username, "role": model.role })),
            created_by,
        )
        .await?;

        txn.commit().await?;

        info!(username = %model.username, "user created");
        Ok(model)
    }

    /// Change a user's password after verifying the current one.
    #[instrument(skip(self, current_password, new_password))]
    pub async fn change_password(
        &self,
        user: user::Model,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ServiceError> {
        if !self
            .auth
            .verify_password(current_password, &user.password_hash)
        {
            return Err(ServiceError::BadRequest(
                "Incorrect current password".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let user_id = user.id;
        let username = user.username.clone();
        let mut active: user::ActiveModel = user.into();
        active.password_hash = Set(self.auth.hash_password(new_password)?);
        active.updated_at = Set(Utc::now());
        active.update(&txn).await?;

        audit::record(
            &txn,
            "users",
            user_id,
            AuditAction::Update,
            None,
            Some(json!({ "password": "changed" })),
            Some(user_id),
        )
        .await?;

        txn.commit().await?;

        info!(username = %username, "password changed");
        Ok(())
    }
}
