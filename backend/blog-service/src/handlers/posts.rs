/// Post handlers - detail page and post authoring
use crate::db::post_repo::PostFields;
use crate::error::Result;
use crate::handlers::required;
use crate::middleware::AuthUser;
use crate::models::Post;
use crate::services::catalog::PostFormOptions;
use crate::services::{CatalogService, PostService};
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PostForm {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[validate(length(min = 1))]
    pub text: String,
    /// Publication time; a future value schedules the post
    pub pub_date: DateTime<Utc>,
    /// Media key of an already uploaded image
    #[validate(length(max = 512))]
    pub image: Option<String>,
    pub location_id: Option<i64>,
    pub category_id: Option<i64>,
    #[serde(default = "default_published")]
    pub is_published: bool,
}

fn default_published() -> bool {
    true
}

impl PostForm {
    fn fields(&self) -> Result<PostFields<'_>> {
        Ok(PostFields {
            title: required("title", &self.title)?,
            text: required("text", &self.text)?,
            pub_date: self.pub_date,
            image: self.image.as_deref().filter(|key| !key.is_empty()),
            location_id: self.location_id,
            category_id: self.category_id,
            is_published: self.is_published,
        })
    }
}

/// What the post editor needs: the post as stored plus the select options
#[derive(Debug, Serialize)]
pub struct PostEditor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Post>,
    pub options: PostFormOptions,
}

/// Blank editor for a new post
pub async fn create_post_form(pool: web::Data<PgPool>, _user: AuthUser) -> Result<HttpResponse> {
    let options = CatalogService::new((**pool).clone()).post_form_options().await?;

    Ok(HttpResponse::Ok().json(PostEditor { post: None, options }))
}

pub async fn create_post(
    pool: web::Data<PgPool>,
    user: AuthUser,
    form: web::Json<PostForm>,
) -> Result<HttpResponse> {
    form.validate()?;

    let service = PostService::new((**pool).clone());
    let post = service.create_post(&user, &form.fields()?).await?;

    Ok(HttpResponse::Created().json(post))
}

/// A post with its comments
pub async fn post_detail(
    pool: web::Data<PgPool>,
    viewer: Option<AuthUser>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let detail = service
        .post_detail(post_id.into_inner(), viewer.as_ref(), Utc::now())
        .await?;

    Ok(HttpResponse::Ok().json(detail))
}

pub async fn edit_post_form(
    pool: web::Data<PgPool>,
    user: AuthUser,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let post = PostService::new((**pool).clone())
        .editable_post(&user, post_id.into_inner())
        .await?;
    let options = CatalogService::new((**pool).clone()).post_form_options().await?;

    Ok(HttpResponse::Ok().json(PostEditor {
        post: Some(post),
        options,
    }))
}

pub async fn update_post(
    pool: web::Data<PgPool>,
    user: AuthUser,
    post_id: web::Path<i64>,
    form: web::Json<PostForm>,
) -> Result<HttpResponse> {
    form.validate()?;

    let service = PostService::new((**pool).clone());
    let post = service
        .update_post(&user, post_id.into_inner(), &form.fields()?)
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

pub async fn delete_post(
    pool: web::Data<PgPool>,
    user: AuthUser,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    service.delete_post(&user, post_id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn form(title: &str, text: &str) -> PostForm {
        PostForm {
            title: title.to_string(),
            text: text.to_string(),
            pub_date: Utc::now(),
            image: Some(String::new()),
            location_id: None,
            category_id: Some(3),
            is_published: true,
        }
    }

    #[test]
    fn post_form_limits() {
        assert!(form("Hello", "World").validate().is_ok());
        assert!(form("", "World").validate().is_err());
        assert!(form("Hello", "").validate().is_err());
        assert!(form(&"x".repeat(257), "World").validate().is_err());
    }

    #[test]
    fn empty_image_key_is_dropped() {
        let form = form("  Hello ", "World");
        let fields = form.fields().unwrap();
        assert_eq!(fields.title, "Hello");
        assert!(fields.image.is_none());
        assert_eq!(fields.category_id, Some(3));
    }

    #[test]
    fn whitespace_only_title_or_text_is_rejected() {
        let blank_title = form("    ", "World");
        assert!(blank_title.validate().is_ok());
        assert!(matches!(blank_title.fields(), Err(AppError::Validation(_))));

        let blank_text = form("Hello", "   ");
        assert!(matches!(blank_text.fields(), Err(AppError::Validation(_))));
    }

    #[test]
    fn published_defaults_to_true() {
        let form: PostForm = serde_json::from_value(serde_json::json!({
            "title": "t",
            "text": "body",
            "pub_date": "2024-03-01T12:00:00Z"
        }))
        .unwrap();
        assert!(form.is_published);
        assert!(form.category_id.is_none());
    }
}
