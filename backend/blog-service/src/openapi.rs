/// OpenAPI documentation for Blog Service
use crate::error::Result;
use crate::handlers::{admin, auth, comments, posts, profile};
use crate::models::{
    Category, Comment, CommentEntry, Location, Post, PostEntry, ProfileSummary, PublicUser,
};
use crate::security::TokenResponse;
use actix_web::HttpResponse;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog Service API",
        version = "1.0.0",
        description = "Blog platform: posts with scheduled publication, categories, locations and comments. Anonymous readers see published content only; authors manage their own posts and comments.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Development server"),
    ),
    tags(
        (name = "health", description = "Service health checks"),
        (name = "feed", description = "Home page and category listings"),
        (name = "posts", description = "Post detail and authoring"),
        (name = "comments", description = "Comments on posts"),
        (name = "profiles", description = "User profiles"),
        (name = "auth", description = "Registration and token login"),
        (name = "admin", description = "Category and location management"),
    ),
    components(schemas(
        Category,
        Location,
        Post,
        PostEntry,
        Comment,
        CommentEntry,
        PublicUser,
        ProfileSummary,
        TokenResponse,
        posts::PostForm,
        comments::CommentForm,
        profile::ProfileForm,
        auth::RegisterRequest,
        auth::LoginRequest,
        admin::CategoryForm,
        admin::LocationForm,
    )),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from POST /auth/login/"))
                        .build(),
                ),
            )
        }
    }
}

pub async fn openapi_json() -> Result<HttpResponse> {
    let body = ApiDoc::openapi().to_json()?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}
