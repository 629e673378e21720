/// Comment service - adding, editing and deleting comments on posts
use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::metrics::record_mutation;
use crate::middleware::{check_mutation, AuthUser};
use crate::models::Comment;
use crate::services::visibility::can_view;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Comment on a post the author can see
    pub async fn add_comment(
        &self,
        author: &AuthUser,
        post_id: i64,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<Comment> {
        let visible = post_repo::find_entry(&self.pool, post_id)
            .await?
            .filter(|entry| can_view(entry, Some(author.user_id), now));
        if visible.is_none() {
            return Err(AppError::NotFound(format!("Post {}", post_id)));
        }

        let comment = comment_repo::create_comment(&self.pool, post_id, author.user_id, text).await?;

        record_mutation("comment", "create");
        tracing::info!(comment_id = comment.id, post_id, author_id = author.user_id, "comment added");
        Ok(comment)
    }

    async fn find_comment(&self, post_id: i64, comment_id: i64) -> Result<Comment> {
        comment_repo::find_in_post(&self.pool, post_id, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Comment {} on post {}", comment_id, post_id)))
    }

    pub async fn editable_comment(
        &self,
        actor: &AuthUser,
        post_id: i64,
        comment_id: i64,
    ) -> Result<Comment> {
        let comment = self.find_comment(post_id, comment_id).await?;
        check_mutation(actor, &comment, "edit")?;
        Ok(comment)
    }

    pub async fn update_comment(
        &self,
        actor: &AuthUser,
        post_id: i64,
        comment_id: i64,
        text: &str,
    ) -> Result<Comment> {
        let comment = self.find_comment(post_id, comment_id).await?;
        check_mutation(actor, &comment, "edit")?;

        let updated = comment_repo::update_comment(&self.pool, comment_id, text).await?;

        record_mutation("comment", "edit");
        tracing::info!(comment_id, post_id, user_id = actor.user_id, "comment updated");
        Ok(updated)
    }

    pub async fn delete_comment(&self, actor: &AuthUser, post_id: i64, comment_id: i64) -> Result<()> {
        let comment = self.find_comment(post_id, comment_id).await?;
        check_mutation(actor, &comment, "delete")?;

        if !comment_repo::delete_comment(&self.pool, comment_id).await? {
            return Err(AppError::NotFound(format!("Comment {}", comment_id)));
        }

        record_mutation("comment", "delete");
        tracing::info!(comment_id, post_id, user_id = actor.user_id, "comment deleted");
        Ok(())
    }
}
