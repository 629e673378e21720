use crate::models::{Comment, CommentEntry};
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;

/// Create a new comment on a post
pub async fn create_comment(
    pool: &PgPool,
    post_id: i64,
    author_id: i64,
    text: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (post_id, author_id, text)
        VALUES ($1, $2, $3)
        RETURNING id, text, post_id, author_id, created_at
        "#,
    )
    .bind(post_id)
    .bind(author_id)
    .bind(text)
    .fetch_one(pool)
    .await
}

/// All comments of a post, oldest first, with author usernames
pub async fn list_for_post(pool: &PgPool, post_id: i64) -> Result<Vec<CommentEntry>, sqlx::Error> {
    sqlx::query_as::<_, CommentEntry>(
        r#"
        SELECT cm.id, cm.text, cm.post_id, cm.author_id, cm.created_at,
               u.username AS author_username
        FROM comments cm
        JOIN users u ON u.id = cm.author_id
        WHERE cm.post_id = $1
        ORDER BY cm.created_at ASC, cm.id ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
}

/// A comment addressed through its parent post
pub async fn find_in_post(
    pool: &PgPool,
    post_id: i64,
    comment_id: i64,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, text, post_id, author_id, created_at
        FROM comments
        WHERE id = $1 AND post_id = $2
        "#,
    )
    .bind(comment_id)
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

pub async fn update_comment(pool: &PgPool, comment_id: i64, text: &str) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET text = $1
        WHERE id = $2
        RETURNING id, text, post_id, author_id, created_at
        "#,
    )
    .bind(text)
    .bind(comment_id)
    .fetch_one(pool)
    .await
}

pub async fn delete_comment(pool: &PgPool, comment_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_for_post<'e, E>(executor: E, post_id: i64) -> Result<i64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(executor)
        .await
}
