use crate::models::Category;
use sqlx::PgPool;

pub struct CategoryFields<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub slug: &'a str,
    pub is_published: bool,
}

pub async fn list_categories(pool: &PgPool, published_only: bool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, title, description, slug, is_published, created_at
        FROM categories
        WHERE is_published OR NOT $1
        ORDER BY title ASC, id ASC
        "#,
    )
    .bind(published_only)
    .fetch_all(pool)
    .await
}

pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, title, description, slug, is_published, created_at
        FROM categories
        WHERE slug = $1
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await
}

pub async fn create_category(pool: &PgPool, fields: &CategoryFields<'_>) -> Result<Category, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (title, description, slug, is_published)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, description, slug, is_published, created_at
        "#,
    )
    .bind(fields.title)
    .bind(fields.description)
    .bind(fields.slug)
    .bind(fields.is_published)
    .fetch_one(pool)
    .await
}

/// Replace the editable fields of the category currently at `slug`.
pub async fn update_category(
    pool: &PgPool,
    slug: &str,
    fields: &CategoryFields<'_>,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(
        r#"
        UPDATE categories
        SET title = $1, description = $2, slug = $3, is_published = $4
        WHERE slug = $5
        RETURNING id, title, description, slug, is_published, created_at
        "#,
    )
    .bind(fields.title)
    .bind(fields.description)
    .bind(fields.slug)
    .bind(fields.is_published)
    .bind(slug)
    .fetch_optional(pool)
    .await
}

/// Delete a category; posts keep existing with `category_id = NULL`.
pub async fn delete_category(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM categories WHERE slug = $1")
        .bind(slug)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
