/// Post service - feeds, post detail, and post authoring
use crate::db::post_repo::{self, FeedScope, PostFields};
use crate::db::{category_repo, comment_repo};
use crate::error::{AppError, Result};
use crate::metrics::record_mutation;
use crate::middleware::{check_mutation, AuthUser};
use crate::models::{Category, CommentEntry, Post, PostEntry};
use crate::services::pagination::{Page, PageRequest};
use crate::services::visibility::can_view;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, Serialize)]
pub struct CategoryFeed {
    pub category: Category,
    pub page_obj: Page<PostEntry>,
}

#[derive(Debug, Serialize)]
pub struct PostDetail {
    pub post: PostEntry,
    pub comments: Vec<CommentEntry>,
}

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn feed(
        &self,
        scope: FeedScope<'_>,
        page: PageRequest,
        now: DateTime<Utc>,
    ) -> Result<Page<PostEntry>> {
        let total = post_repo::count_entries(&self.pool, scope, now).await?;
        let items =
            post_repo::list_entries(&self.pool, scope, now, page.limit(), page.offset()).await?;

        Ok(Page::new(items, page, total))
    }

    /// Publicly visible posts, newest first
    pub async fn home_feed(&self, page: PageRequest, now: DateTime<Utc>) -> Result<Page<PostEntry>> {
        self.feed(FeedScope::Home, page, now).await
    }

    /// Publicly visible posts of a published category
    pub async fn category_feed(
        &self,
        slug: &str,
        page: PageRequest,
        now: DateTime<Utc>,
    ) -> Result<CategoryFeed> {
        let category = category_repo::find_by_slug(&self.pool, slug)
            .await?
            .filter(|category| category.is_published)
            .ok_or_else(|| AppError::NotFound(format!("Category '{}'", slug)))?;

        let page_obj = self.feed(FeedScope::Category(slug), page, now).await?;
        Ok(CategoryFeed { category, page_obj })
    }

    /// An author's posts; the author themselves also sees hidden ones
    pub async fn author_feed(
        &self,
        author_id: i64,
        viewer: Option<&AuthUser>,
        page: PageRequest,
        now: DateTime<Utc>,
    ) -> Result<Page<PostEntry>> {
        let include_hidden = viewer.map(|v| v.user_id) == Some(author_id);
        self.feed(
            FeedScope::Author {
                author_id,
                include_hidden,
            },
            page,
            now,
        )
        .await
    }

    /// The post if `viewer` may read it; otherwise not found
    pub async fn visible_entry(
        &self,
        post_id: i64,
        viewer: Option<&AuthUser>,
        now: DateTime<Utc>,
    ) -> Result<PostEntry> {
        let not_found = || AppError::NotFound(format!("Post {}", post_id));
        let entry = post_repo::find_entry(&self.pool, post_id)
            .await?
            .ok_or_else(not_found)?;

        if can_view(&entry, viewer.map(|v| v.user_id), now) {
            Ok(entry)
        } else {
            tracing::debug!(post_id, "post hidden from viewer");
            Err(not_found())
        }
    }

    pub async fn post_detail(
        &self,
        post_id: i64,
        viewer: Option<&AuthUser>,
        now: DateTime<Utc>,
    ) -> Result<PostDetail> {
        let post = self.visible_entry(post_id, viewer, now).await?;
        let comments = comment_repo::list_for_post(&self.pool, post_id).await?;
        Ok(PostDetail { post, comments })
    }

    pub async fn create_post(&self, author: &AuthUser, fields: &PostFields<'_>) -> Result<Post> {
        let post = post_repo::create_post(&self.pool, author.user_id, fields).await?;

        record_mutation("post", "create");
        tracing::info!(post_id = post.id, author_id = author.user_id, "post created");
        Ok(post)
    }

    async fn find_post(&self, post_id: i64) -> Result<Post> {
        post_repo::find_post(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {}", post_id)))
    }

    /// The post as stored, for its editor
    pub async fn editable_post(&self, actor: &AuthUser, post_id: i64) -> Result<Post> {
        let post = self.find_post(post_id).await?;
        check_mutation(actor, &post, "edit")?;
        Ok(post)
    }

    pub async fn update_post(
        &self,
        actor: &AuthUser,
        post_id: i64,
        fields: &PostFields<'_>,
    ) -> Result<Post> {
        let post = self.find_post(post_id).await?;
        check_mutation(actor, &post, "edit")?;

        let updated = post_repo::update_post(&self.pool, post_id, fields).await?;

        record_mutation("post", "edit");
        tracing::info!(post_id, user_id = actor.user_id, "post updated");
        Ok(updated)
    }

    /// Delete a post together with its comments
    pub async fn delete_post(&self, actor: &AuthUser, post_id: i64) -> Result<()> {
        let post = self.find_post(post_id).await?;
        check_mutation(actor, &post, "delete")?;

        let mut tx = self.pool.begin().await?;
        let comment_count = comment_repo::count_for_post(&mut *tx, post_id).await?;
        let deleted = post_repo::delete_post(&mut *tx, post_id).await?;
        tx.commit().await?;

        if !deleted {
            // Removed concurrently between lookup and delete.
            return Err(AppError::NotFound(format!("Post {}", post_id)));
        }

        record_mutation("post", "delete");
        tracing::info!(post_id, user_id = actor.user_id, comment_count, "post deleted");
        Ok(())
    }
}
