/// Admin handlers - category and location management (superusers only)
use crate::db::category_repo::CategoryFields;
use crate::error::Result;
use crate::handlers::required;
use crate::middleware::AuthUser;
use crate::services::CatalogService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use utoipa::ToSchema;
use validator::Validate;

fn default_published() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CategoryForm {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, max = 64))]
    pub slug: String,
    #[serde(default = "default_published")]
    pub is_published: bool,
}

impl CategoryForm {
    fn fields(&self) -> Result<CategoryFields<'_>> {
        Ok(CategoryFields {
            title: required("title", &self.title)?,
            description: self.description.trim(),
            slug: required("slug", &self.slug)?,
            is_published: self.is_published,
        })
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LocationForm {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[serde(default = "default_published")]
    pub is_published: bool,
}

pub async fn list_categories(pool: web::Data<PgPool>, user: AuthUser) -> Result<HttpResponse> {
    let categories = CatalogService::new((**pool).clone())
        .list_categories(&user)
        .await?;

    Ok(HttpResponse::Ok().json(categories))
}

pub async fn create_category(
    pool: web::Data<PgPool>,
    user: AuthUser,
    form: web::Json<CategoryForm>,
) -> Result<HttpResponse> {
    form.validate()?;

    let category = CatalogService::new((**pool).clone())
        .create_category(&user, &form.fields()?)
        .await?;

    Ok(HttpResponse::Created().json(category))
}

pub async fn update_category(
    pool: web::Data<PgPool>,
    user: AuthUser,
    slug: web::Path<String>,
    form: web::Json<CategoryForm>,
) -> Result<HttpResponse> {
    form.validate()?;

    let category = CatalogService::new((**pool).clone())
        .update_category(&user, &slug, &form.fields()?)
        .await?;

    Ok(HttpResponse::Ok().json(category))
}

pub async fn delete_category(
    pool: web::Data<PgPool>,
    user: AuthUser,
    slug: web::Path<String>,
) -> Result<HttpResponse> {
    CatalogService::new((**pool).clone())
        .delete_category(&user, &slug)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub async fn list_locations(pool: web::Data<PgPool>, user: AuthUser) -> Result<HttpResponse> {
    let locations = CatalogService::new((**pool).clone())
        .list_locations(&user)
        .await?;

    Ok(HttpResponse::Ok().json(locations))
}

pub async fn create_location(
    pool: web::Data<PgPool>,
    user: AuthUser,
    form: web::Json<LocationForm>,
) -> Result<HttpResponse> {
    form.validate()?;

    let location = CatalogService::new((**pool).clone())
        .create_location(&user, required("name", &form.name)?, form.is_published)
        .await?;

    Ok(HttpResponse::Created().json(location))
}

pub async fn update_location(
    pool: web::Data<PgPool>,
    user: AuthUser,
    location_id: web::Path<i64>,
    form: web::Json<LocationForm>,
) -> Result<HttpResponse> {
    form.validate()?;

    let location = CatalogService::new((**pool).clone())
        .update_location(
            &user,
            location_id.into_inner(),
            required("name", &form.name)?,
            form.is_published,
        )
        .await?;

    Ok(HttpResponse::Ok().json(location))
}

pub async fn delete_location(
    pool: web::Data<PgPool>,
    user: AuthUser,
    location_id: web::Path<i64>,
) -> Result<HttpResponse> {
    CatalogService::new((**pool).clone())
        .delete_location(&user, location_id.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
