use crate::models::User;
use sqlx::PgPool;

const USER_COLUMNS: &str =
    "id, username, email, first_name, last_name, password_hash, is_superuser, created_at";

pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password_hash: &'a str,
}

pub struct ProfileChanges<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

/// Insert a new user. A taken username surfaces as a unique violation.
pub async fn create_user(pool: &PgPool, new_user: &NewUser<'_>) -> Result<User, sqlx::Error> {
    let sql = format!(
        r#"
        INSERT INTO users (username, email, first_name, last_name, password_hash)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {USER_COLUMNS}
        "#
    );

    sqlx::query_as::<_, User>(&sql)
        .bind(new_user.username)
        .bind(new_user.email)
        .bind(new_user.first_name)
        .bind(new_user.last_name)
        .bind(new_user.password_hash)
        .fetch_one(pool)
        .await
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
    sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn update_profile(
    pool: &PgPool,
    user_id: i64,
    changes: &ProfileChanges<'_>,
) -> Result<User, sqlx::Error> {
    let sql = format!(
        r#"
        UPDATE users
        SET username = $1, email = $2, first_name = $3, last_name = $4
        WHERE id = $5
        RETURNING {USER_COLUMNS}
        "#
    );

    sqlx::query_as::<_, User>(&sql)
        .bind(changes.username)
        .bind(changes.email)
        .bind(changes.first_name)
        .bind(changes.last_name)
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// Grant or revoke superuser rights (used by the admin bootstrap and tests).
pub async fn set_superuser(pool: &PgPool, user_id: i64, is_superuser: bool) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET is_superuser = $1 WHERE id = $2")
        .bind(is_superuser)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
