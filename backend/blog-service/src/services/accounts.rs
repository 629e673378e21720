/// Account service - registration, login and superuser bootstrap
use crate::db::user_repo::{self, NewUser};
use crate::error::{AppError, Result};
use crate::models::PublicUser;
use crate::security::{password, JwtKeys, TokenResponse};
use sqlx::PgPool;

/// Usernames may contain letters, digits and `@ . + - _`.
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

pub(crate) fn check_username(username: &str) -> Result<()> {
    if is_valid_username(username) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Username may contain only letters, digits and @/./+/-/_".to_string(),
        ))
    }
}

pub struct Registration<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

pub struct AccountService {
    pool: PgPool,
}

impl AccountService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, registration: &Registration<'_>) -> Result<PublicUser> {
        check_username(registration.username)?;
        let password_hash = password::hash_password(registration.password)?;

        let user = user_repo::create_user(
            &self.pool,
            &NewUser {
                username: registration.username,
                email: registration.email,
                first_name: registration.first_name,
                last_name: registration.last_name,
                password_hash: &password_hash,
            },
        )
        .await
        .map_err(|err| match AppError::from(err) {
            AppError::Conflict(_) => AppError::Conflict(format!(
                "Username '{}' is already taken",
                registration.username
            )),
            other => other,
        })?;

        tracing::info!(user_id = user.id, "user registered");
        Ok(user.into())
    }

    pub async fn login(&self, keys: &JwtKeys, username: &str, password: &str) -> Result<TokenResponse> {
        let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

        let Some(user) = user_repo::find_by_username(&self.pool, username).await? else {
            password::verify_dummy(password);
            return Err(invalid());
        };

        if !password::verify_password(password, &user.password_hash)? {
            tracing::debug!(user_id = user.id, "login rejected");
            return Err(invalid());
        }

        keys.issue(&user)
    }

    /// Promote an existing account to superuser; used at startup.
    pub async fn promote_superuser(&self, username: &str) -> Result<()> {
        let user = user_repo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}'", username)))?;

        user_repo::set_superuser(&self.pool, user.id, true).await?;
        tracing::info!(user_id = user.id, "superuser rights granted");
        Ok(())
    }
}
