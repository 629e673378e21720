/// Profile service - a user's public page and profile editing
use crate::db::user_repo::{self, ProfileChanges};
use crate::error::{AppError, Result};
use crate::metrics::record_mutation;
use crate::middleware::{check_mutation, AuthUser};
use crate::models::{PostEntry, ProfileSummary, PublicUser, User};
use crate::services::accounts::check_username;
use crate::services::pagination::{Page, PageRequest};
use crate::services::posts::PostService;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

#[derive(Debug, Serialize)]
pub struct ProfilePage {
    pub profile: ProfileSummary,
    pub page_obj: Page<PostEntry>,
}

pub struct ProfileService {
    pool: PgPool,
}

impl ProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_user(&self, username: &str) -> Result<User> {
        user_repo::find_by_username(&self.pool, username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}'", username)))
    }

    pub async fn profile(
        &self,
        username: &str,
        viewer: Option<&AuthUser>,
        page: PageRequest,
        now: DateTime<Utc>,
    ) -> Result<ProfilePage> {
        let user = self.find_user(username).await?;
        let page_obj = PostService::new(self.pool.clone())
            .author_feed(user.id, viewer, page, now)
            .await?;

        Ok(ProfilePage {
            profile: user.into(),
            page_obj,
        })
    }

    pub async fn editable_profile(&self, actor: &AuthUser, username: &str) -> Result<PublicUser> {
        let user = self.find_user(username).await?;
        check_mutation(actor, &user, "edit")?;
        Ok(user.into())
    }

    pub async fn update_profile(
        &self,
        actor: &AuthUser,
        username: &str,
        changes: &ProfileChanges<'_>,
    ) -> Result<PublicUser> {
        let user = self.find_user(username).await?;
        check_mutation(actor, &user, "edit")?;
        check_username(changes.username)?;

        let updated = user_repo::update_profile(&self.pool, user.id, changes).await?;

        record_mutation("profile", "edit");
        tracing::info!(user_id = updated.id, "profile updated");
        Ok(updated.into())
    }
}
