/// Profile handlers - public profile page and profile editing
use crate::db::user_repo::ProfileChanges;
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::services::{PageQuery, ProfileService};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProfileForm {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub last_name: String,
}

impl ProfileForm {
    fn changes(&self) -> ProfileChanges<'_> {
        ProfileChanges {
            username: self.username.trim(),
            email: self.email.trim(),
            first_name: self.first_name.trim(),
            last_name: self.last_name.trim(),
        }
    }
}

/// Profile info plus a page of the user's posts
pub async fn profile(
    pool: web::Data<PgPool>,
    viewer: Option<AuthUser>,
    username: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let service = ProfileService::new((**pool).clone());
    let page = service
        .profile(&username, viewer.as_ref(), query.request(), Utc::now())
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

pub async fn edit_profile_form(
    pool: web::Data<PgPool>,
    user: AuthUser,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    let service = ProfileService::new((**pool).clone());
    let profile = service.editable_profile(&user, &username).await?;

    Ok(HttpResponse::Ok().json(profile))
}

pub async fn update_profile(
    pool: web::Data<PgPool>,
    user: AuthUser,
    username: web::Path<String>,
    form: web::Json<ProfileForm>,
) -> Result<HttpResponse> {
    form.validate()?;

    let service = ProfileService::new((**pool).clone());
    let profile = service
        .update_profile(&user, &username, &form.changes())
        .await?;

    Ok(HttpResponse::Ok().json(profile))
}
