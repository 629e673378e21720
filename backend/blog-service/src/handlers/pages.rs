/// Static pages and the catch-all not-found handler
use crate::error::{AppError, Result};
use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct StaticPage {
    slug: &'static str,
    title: &'static str,
    content: &'static str,
}

const ABOUT: StaticPage = StaticPage {
    slug: "about",
    title: "About the project",
    content: "Blogicum is a place to share travel stories, city walks and everything in between. \
              Authors publish posts, tag them with a category and a location, and readers discuss them in the comments.",
};

const RULES: StaticPage = StaticPage {
    slug: "rules",
    title: "Community rules",
    content: "Be polite to other authors and readers. Publish only content you have the rights to. \
              Posts and comments that break these rules are removed by moderators.",
};

pub async fn about() -> HttpResponse {
    HttpResponse::Ok().json(ABOUT)
}

pub async fn rules() -> HttpResponse {
    HttpResponse::Ok().json(RULES)
}

/// Default service: unknown routes get the same JSON 404 document as
/// missing content.
pub async fn not_found() -> Result<HttpResponse> {
    Err(AppError::NotFound("Page not found".to_string()))
}
