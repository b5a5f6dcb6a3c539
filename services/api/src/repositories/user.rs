//! User repository for database operations

use sqlx::{PgPool, Row};
use thiserror::Error;
use tracing::info;

use crate::models::user::{NewUser, User};
use crate::password;

/// Errors from the credential store
#[derive(Debug, Error)]
pub enum UserStoreError {
    /// The email is already registered
    #[error("Email already registered.")]
    DuplicateEmail,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a new user
    ///
    /// The password is hashed here, before the insert; the plaintext is
    /// never persisted. Fails with [`UserStoreError::DuplicateEmail`] if
    /// the email is already taken.
    pub async fn create(&self, new_user: &NewUser) -> Result<User, UserStoreError> {
        info!("Registering new user: {}", new_user.email);

        if self.find_by_email(&new_user.email).await?.is_some() {
            return Err(UserStoreError::DuplicateEmail);
        }

        let password_hash = password::hash(&new_user.password)
            .map_err(|e| UserStoreError::PasswordHash(e.to_string()))?;

        let row = sqlx::query(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Two concurrent signups can both pass the lookup above; the
            // unique constraint is the arbiter.
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("users_email_key") {
                    return UserStoreError::DuplicateEmail;
                }
            }
            UserStoreError::Database(e)
        })?;

        Ok(Self::row_to_user(&row))
    }

    /// Find a user by email (exact, case-sensitive match)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_user))
    }

    fn row_to_user(row: &sqlx::postgres::PgRow) -> User {
        User {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}
