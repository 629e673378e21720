use crate::models::Location;
use sqlx::PgPool;

pub async fn list_locations(pool: &PgPool, published_only: bool) -> Result<Vec<Location>, sqlx::Error> {
    sqlx::query_as::<_, Location>(
        r#"
        SELECT id, name, is_published, created_at
        FROM locations
        WHERE is_published OR NOT $1
        ORDER BY name ASC, id ASC
        "#,
    )
    .bind(published_only)
    .fetch_all(pool)
    .await
}

pub async fn create_location(pool: &PgPool, name: &str, is_published: bool) -> Result<Location, sqlx::Error> {
    sqlx::query_as::<_, Location>(
        r#"
        INSERT INTO locations (name, is_published)
        VALUES ($1, $2)
        RETURNING id, name, is_published, created_at
        "#,
    )
    .bind(name)
    .bind(is_published)
    .fetch_one(pool)
    .await
}

pub async fn update_location(
    pool: &PgPool,
    location_id: i64,
    name: &str,
    is_published: bool,
) -> Result<Option<Location>, sqlx::Error> {
    sqlx::query_as::<_, Location>(
        r#"
        UPDATE locations
        SET name = $1, is_published = $2
        WHERE id = $3
        RETURNING id, name, is_published, created_at
        "#,
    )
    .bind(name)
    .bind(is_published)
    .bind(location_id)
    .fetch_optional(pool)
    .await
}

/// Delete a location; posts keep existing with `location_id = NULL`.
pub async fn delete_location(pool: &PgPool, location_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM locations WHERE id = $1")
        .bind(location_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
