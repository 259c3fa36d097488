//! Account registry.
//!
//! Enforces uniqueness of the email identifier and runs every plaintext
//! secret through the password codec at the three points where one crosses
//! the boundary: registration, password change, and login. The stored
//! credential never leaves this module.

use crate::anagrafe::password;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use sqlx::{PgPool, Row};
use tokio::task;
use tracing::error;
use utoipa::ToSchema;

/// A persisted account, identity fields only.
#[derive(ToSchema, Serialize, Debug)]
pub struct Account {
    pub id: i32,
    pub email: String,
}

#[derive(Debug)]
pub enum RegistryError {
    AlreadyExists,
    NotFound,
    /// Covers both an unknown email and a wrong password, so the login
    /// endpoint cannot be used to probe which addresses are registered.
    InvalidCredentials,
    Database(sqlx::Error),
    Hash(bcrypt::BcryptError),
    Task(task::JoinError),
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        match self {
            Self::AlreadyExists => {
                (StatusCode::BAD_REQUEST, "User already exists").into_response()
            }
            Self::NotFound => (StatusCode::NOT_FOUND, "User not found").into_response(),
            Self::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid email or password").into_response()
            }
            Self::Database(err) => {
                error!("Database error: {err}");

                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            Self::Hash(err) => {
                error!("Password hashing error: {err}");

                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            Self::Task(err) => {
                error!("Hashing task failed: {err}");

                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Register a new account.
///
/// The existence check and the insert are not one atomic step; the `UNIQUE`
/// constraint on `users.email` is the backstop, and a unique violation from
/// a concurrent duplicate maps to `AlreadyExists` as well.
///
/// # Errors
/// `AlreadyExists` if the email is taken, otherwise database or hashing
/// failures.
pub async fn register(pool: &PgPool, email: &str, secret: String) -> Result<Account, RegistryError> {
    if account_exists(pool, email)
        .await
        .map_err(RegistryError::Database)?
    {
        return Err(RegistryError::AlreadyExists);
    }

    let hashed = hash_offloaded(secret).await?;

    let row = sqlx::query("INSERT INTO users (email, password) VALUES ($1, $2) RETURNING id")
        .bind(email)
        .bind(&hashed)
        .fetch_one(pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                RegistryError::AlreadyExists
            } else {
                RegistryError::Database(err)
            }
        })?;

    Ok(Account {
        id: row.get("id"),
        email: email.to_string(),
    })
}

/// List all accounts. The password column is never selected.
///
/// # Errors
/// Returns a database failure.
pub async fn list(pool: &PgPool) -> Result<Vec<Account>, RegistryError> {
    let rows = sqlx::query("SELECT id, email FROM users ORDER BY id")
        .fetch_all(pool)
        .await
        .map_err(RegistryError::Database)?;

    Ok(rows
        .into_iter()
        .map(|row| Account {
            id: row.get("id"),
            email: row.get("email"),
        })
        .collect())
}

/// Replace the stored credential for an account.
///
/// # Errors
/// `NotFound` if no account has this email.
pub async fn change_password(
    pool: &PgPool,
    email: &str,
    new_secret: String,
) -> Result<(), RegistryError> {
    let hashed = hash_offloaded(new_secret).await?;

    let result = sqlx::query("UPDATE users SET password = $1 WHERE email = $2")
        .bind(&hashed)
        .bind(email)
        .execute(pool)
        .await
        .map_err(RegistryError::Database)?;

    if result.rows_affected() == 0 {
        return Err(RegistryError::NotFound);
    }

    Ok(())
}

/// Permanently remove an account.
///
/// # Errors
/// `NotFound` if no account has this email.
pub async fn delete(pool: &PgPool, email: &str) -> Result<(), RegistryError> {
    let result = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await
        .map_err(RegistryError::Database)?;

    if result.rows_affected() == 0 {
        return Err(RegistryError::NotFound);
    }

    Ok(())
}

/// Verify login credentials.
///
/// # Errors
/// `InvalidCredentials` for an unknown email and for a wrong password alike,
/// with no distinguishing signal between the two.
pub async fn login(pool: &PgPool, email: &str, secret: String) -> Result<(), RegistryError> {
    let Some(stored) = stored_credential(pool, email)
        .await
        .map_err(RegistryError::Database)?
    else {
        return Err(RegistryError::InvalidCredentials);
    };

    let verified = task::spawn_blocking(move || password::verify(&secret, &stored))
        .await
        .map_err(RegistryError::Task)?;

    if verified {
        Ok(())
    } else {
        Err(RegistryError::InvalidCredentials)
    }
}

// bcrypt is deliberately slow, keep it off the async executor
async fn hash_offloaded(secret: String) -> Result<String, RegistryError> {
    task::spawn_blocking(move || password::hash(&secret))
        .await
        .map_err(RegistryError::Task)?
        .map_err(RegistryError::Hash)
}

async fn account_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1) AS exists")
        .bind(email)
        .fetch_one(pool)
        .await?;

    Ok(row.get("exists"))
}

async fn stored_credential(pool: &PgPool, email: &str) -> Result<Option<String>, sqlx::Error> {
    let row = sqlx::query("SELECT password FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| row.get(0)))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            RegistryError::AlreadyExists.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RegistryError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RegistryError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            RegistryError::Database(sqlx::Error::RowNotFound)
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_account_serialization_has_no_credential() {
        let account = Account {
            id: 1,
            email: "a@x.com".to_string(),
        };

        let value = serde_json::to_value(&account).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["email", "id"]);
    }
}
