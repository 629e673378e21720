/// Feed handlers - home page and category listings
use crate::error::Result;
use crate::services::{PageQuery, PostService};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::PgPool;

/// Home page: every publicly visible post, newest first
pub async fn index(pool: web::Data<PgPool>, query: web::Query<PageQuery>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let page = service.home_feed(query.request(), Utc::now()).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// Publicly visible posts of one published category
pub async fn category_posts(
    pool: web::Data<PgPool>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let feed = service
        .category_feed(&slug, query.request(), Utc::now())
        .await?;

    Ok(HttpResponse::Ok().json(feed))
}
