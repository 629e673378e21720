/// Catalog service - categories and locations
///
/// Administration is superuser-only; post authors read the catalog to pick a
/// category and location for their post.
use crate::db::category_repo::{self, CategoryFields};
use crate::db::location_repo;
use crate::error::{AppError, Result};
use crate::metrics::record_mutation;
use crate::middleware::{require_superuser, AuthUser};
use crate::models::{Category, Location};
use serde::Serialize;
use sqlx::PgPool;

/// Choices offered by the post editor
#[derive(Debug, Serialize)]
pub struct PostFormOptions {
    pub categories: Vec<Category>,
    pub locations: Vec<Location>,
}

/// Slugs may contain latin letters, digits, hyphens and underscores.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub struct CatalogService {
    pool: PgPool,
}

impl CatalogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn post_form_options(&self) -> Result<PostFormOptions> {
        Ok(PostFormOptions {
            categories: category_repo::list_categories(&self.pool, false).await?,
            locations: location_repo::list_locations(&self.pool, false).await?,
        })
    }

    pub async fn list_categories(&self, actor: &AuthUser) -> Result<Vec<Category>> {
        require_superuser(actor)?;
        Ok(category_repo::list_categories(&self.pool, false).await?)
    }

    pub async fn create_category(&self, actor: &AuthUser, fields: &CategoryFields<'_>) -> Result<Category> {
        require_superuser(actor)?;
        check_slug(fields.slug)?;

        let category = category_repo::create_category(&self.pool, fields).await?;
        record_mutation("category", "create");
        tracing::info!(slug = %category.slug, "category created");
        Ok(category)
    }

    pub async fn update_category(
        &self,
        actor: &AuthUser,
        slug: &str,
        fields: &CategoryFields<'_>,
    ) -> Result<Category> {
        require_superuser(actor)?;
        check_slug(fields.slug)?;

        let category = category_repo::update_category(&self.pool, slug, fields)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category '{}'", slug)))?;
        record_mutation("category", "edit");
        tracing::info!(slug = %category.slug, is_published = category.is_published, "category updated");
        Ok(category)
    }

    pub async fn delete_category(&self, actor: &AuthUser, slug: &str) -> Result<()> {
        require_superuser(actor)?;
        if !category_repo::delete_category(&self.pool, slug).await? {
            return Err(AppError::NotFound(format!("Category '{}'", slug)));
        }
        record_mutation("category", "delete");
        tracing::info!(slug, "category deleted");
        Ok(())
    }

    pub async fn list_locations(&self, actor: &AuthUser) -> Result<Vec<Location>> {
        require_superuser(actor)?;
        Ok(location_repo::list_locations(&self.pool, false).await?)
    }

    pub async fn create_location(&self, actor: &AuthUser, name: &str, is_published: bool) -> Result<Location> {
        require_superuser(actor)?;
        let location = location_repo::create_location(&self.pool, name, is_published).await?;
        record_mutation("location", "create");
        tracing::info!(location_id = location.id, "location created");
        Ok(location)
    }

    pub async fn update_location(
        &self,
        actor: &AuthUser,
        location_id: i64,
        name: &str,
        is_published: bool,
    ) -> Result<Location> {
        require_superuser(actor)?;
        let location = location_repo::update_location(&self.pool, location_id, name, is_published)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location {}", location_id)))?;
        record_mutation("location", "edit");
        tracing::info!(location_id, is_published, "location updated");
        Ok(location)
    }

    pub async fn delete_location(&self, actor: &AuthUser, location_id: i64) -> Result<()> {
        require_superuser(actor)?;
        if !location_repo::delete_location(&self.pool, location_id).await? {
            return Err(AppError::NotFound(format!("Location {}", location_id)));
        }
        record_mutation("location", "delete");
        tracing::info!(location_id, "location deleted");
        Ok(())
    }
}

fn check_slug(slug: &str) -> Result<()> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Slug may contain only latin letters, digits, hyphens and underscores".to_string(),
        ))
    }
}
