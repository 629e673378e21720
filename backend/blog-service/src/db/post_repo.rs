use crate::models::{Post, PostEntry};
use crate::services::visibility::push_public_filter;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgExecutor;
use sqlx::{PgPool, Postgres, QueryBuilder};

const POST_COLUMNS: &str = "id, title, text, pub_date, image, author_id, location_id, category_id, \
                            is_published, created_at";

const ENTRY_SELECT: &str = r#"
    SELECT p.id, p.title, p.text, p.pub_date, p.image, p.author_id, p.location_id,
           p.category_id, p.is_published, p.created_at,
           u.username AS author_username,
           c.slug AS category_slug,
           c.title AS category_title,
           c.is_published AS category_is_published,
           l.name AS location_name,
           l.is_published AS location_is_published,
           (SELECT COUNT(*) FROM comments cm WHERE cm.post_id = p.id) AS comment_count
    FROM posts p
    JOIN users u ON u.id = p.author_id
    LEFT JOIN categories c ON c.id = p.category_id
    LEFT JOIN locations l ON l.id = p.location_id
"#;

const ENTRY_COUNT: &str = r#"
    SELECT COUNT(*)
    FROM posts p
    LEFT JOIN categories c ON c.id = p.category_id
    LEFT JOIN locations l ON l.id = p.location_id
"#;

/// Which posts a feed query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedScope<'a> {
    /// Every publicly visible post
    Home,
    /// Publicly visible posts in the category with this slug
    Category(&'a str),
    /// Posts by one author; `include_hidden` is set when the author is the viewer
    Author { author_id: i64, include_hidden: bool },
}

impl FeedScope<'_> {
    fn include_hidden(&self) -> bool {
        matches!(
            self,
            FeedScope::Author {
                include_hidden: true,
                ..
            }
        )
    }
}

fn push_scope(qb: &mut QueryBuilder<'_, Postgres>, scope: &FeedScope<'_>, now: DateTime<Utc>) {
    qb.push(" WHERE TRUE");
    match scope {
        FeedScope::Home => {}
        FeedScope::Category(slug) => {
            qb.push(" AND c.slug = ");
            qb.push_bind(slug.to_string());
        }
        FeedScope::Author { author_id, .. } => {
            qb.push(" AND p.author_id = ");
            qb.push_bind(*author_id);
        }
    }
    if !scope.include_hidden() {
        push_public_filter(qb, now);
    }
}

/// One page of feed entries, newest publish date first.
pub async fn list_entries(
    pool: &PgPool,
    scope: FeedScope<'_>,
    now: DateTime<Utc>,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostEntry>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(ENTRY_SELECT);
    push_scope(&mut qb, &scope, now);
    qb.push(" ORDER BY p.pub_date DESC, p.id DESC LIMIT ");
    qb.push_bind(limit);
    qb.push(" OFFSET ");
    qb.push_bind(offset);

    qb.build_query_as::<PostEntry>().fetch_all(pool).await
}

pub async fn count_entries(
    pool: &PgPool,
    scope: FeedScope<'_>,
    now: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(ENTRY_COUNT);
    push_scope(&mut qb, &scope, now);

    qb.build_query_scalar::<i64>().fetch_one(pool).await
}

/// A single entry regardless of its visibility.
pub async fn find_entry(pool: &PgPool, post_id: i64) -> Result<Option<PostEntry>, sqlx::Error> {
    let mut qb = QueryBuilder::<Postgres>::new(ENTRY_SELECT);
    qb.push(" WHERE p.id = ");
    qb.push_bind(post_id);

    qb.build_query_as::<PostEntry>().fetch_optional(pool).await
}

pub async fn find_post(pool: &PgPool, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
    let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
    sqlx::query_as::<_, Post>(&sql)
        .bind(post_id)
        .fetch_optional(pool)
        .await
}

/// Editable post fields, shared by create and edit.
pub struct PostFields<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub pub_date: DateTime<Utc>,
    pub image: Option<&'a str>,
    pub location_id: Option<i64>,
    pub category_id: Option<i64>,
    pub is_published: bool,
}

pub async fn create_post(
    pool: &PgPool,
    author_id: i64,
    fields: &PostFields<'_>,
) -> Result<Post, sqlx::Error> {
    let sql = format!(
        r#"
        INSERT INTO posts (title, text, pub_date, image, author_id, location_id, category_id, is_published)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {POST_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Post>(&sql)
        .bind(fields.title)
        .bind(fields.text)
        .bind(fields.pub_date)
        .bind(fields.image)
        .bind(author_id)
        .bind(fields.location_id)
        .bind(fields.category_id)
        .bind(fields.is_published)
        .fetch_one(pool)
        .await
}

pub async fn update_post(
    pool: &PgPool,
    post_id: i64,
    fields: &PostFields<'_>,
) -> Result<Post, sqlx::Error> {
    let sql = format!(
        r#"
        UPDATE posts
        SET title = $1, text = $2, pub_date = $3, image = $4,
            location_id = $5, category_id = $6, is_published = $7
        WHERE id = $8
        RETURNING {POST_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Post>(&sql)
        .bind(fields.title)
        .bind(fields.text)
        .bind(fields.pub_date)
        .bind(fields.image)
        .bind(fields.location_id)
        .bind(fields.category_id)
        .bind(fields.is_published)
        .bind(post_id)
        .fetch_one(pool)
        .await
}

/// Hard delete; comments go with it through `ON DELETE CASCADE`.
pub async fn delete_post<'e, E>(executor: E, post_id: i64) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}
