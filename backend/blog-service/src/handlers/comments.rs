/// Comment handlers - nested under their post
use crate::error::Result;
use crate::handlers::required;
use crate::middleware::AuthUser;
use crate::services::CommentService;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CommentForm {
    #[validate(length(min = 1, max = 10000))]
    pub text: String,
}

pub async fn add_comment(
    pool: web::Data<PgPool>,
    user: AuthUser,
    post_id: web::Path<i64>,
    form: web::Json<CommentForm>,
) -> Result<HttpResponse> {
    form.validate()?;
    let text = required("text", &form.text)?;

    let service = CommentService::new((**pool).clone());
    let comment = service
        .add_comment(&user, post_id.into_inner(), text, Utc::now())
        .await?;

    Ok(HttpResponse::Created().json(comment))
}

pub async fn edit_comment_form(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let comment = CommentService::new((**pool).clone())
        .editable_comment(&user, post_id, comment_id)
        .await?;

    Ok(HttpResponse::Ok().json(comment))
}

pub async fn update_comment(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<(i64, i64)>,
    form: web::Json<CommentForm>,
) -> Result<HttpResponse> {
    form.validate()?;
    let text = required("text", &form.text)?;
    let (post_id, comment_id) = path.into_inner();

    let service = CommentService::new((**pool).clone());
    let comment = service
        .update_comment(&user, post_id, comment_id, text)
        .await?;

    Ok(HttpResponse::Ok().json(comment))
}

pub async fn delete_comment(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();

    let service = CommentService::new((**pool).clone());
    service.delete_comment(&user, post_id, comment_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
