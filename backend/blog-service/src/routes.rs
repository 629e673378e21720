/// Route table for blog-service
///
/// Paths keep their trailing slashes. Path segments that fail to parse
/// (`/posts/abc/`) are reported as not found, body and query errors as bad
/// requests; both use the JSON error document.
use crate::error::AppError;
use crate::handlers::{self, admin, auth, health, pages};
use crate::metrics::serve_metrics;
use crate::openapi::openapi_json;
use actix_web::web;

const JSON_LIMIT: usize = 64 * 1024;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT)
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|_err, req| AppError::NotFound(req.path().to_string()).into()),
    )
    // Operational
    .route("/health", web::get().to(health::health))
    .route("/health/ready", web::get().to(health::ready))
    .route("/health/live", web::get().to(health::live))
    .route("/metrics", web::get().to(serve_metrics))
    .route("/openapi.json", web::get().to(openapi_json))
    // Feeds
    .route("/", web::get().to(handlers::index))
    .route("/category/{slug}/", web::get().to(handlers::category_posts))
    // Profiles
    .route("/profile/{username}/", web::get().to(handlers::profile))
    .service(
        web::resource("/profile/{username}/edit/")
            .route(web::get().to(handlers::edit_profile_form))
            .route(web::post().to(handlers::update_profile)),
    )
    // Posts; `create/` is registered before `{post_id}/` so it is not taken for an id
    .service(
        web::resource("/posts/create/")
            .route(web::get().to(handlers::create_post_form))
            .route(web::post().to(handlers::create_post)),
    )
    .route("/posts/{post_id}/", web::get().to(handlers::post_detail))
    .service(
        web::resource("/posts/{post_id}/edit/")
            .route(web::get().to(handlers::edit_post_form))
            .route(web::post().to(handlers::update_post)),
    )
    .route("/posts/{post_id}/delete/", web::post().to(handlers::delete_post))
    // Comments
    .route("/posts/{post_id}/comment/", web::post().to(handlers::add_comment))
    .service(
        web::resource("/posts/{post_id}/edit_comment/{comment_id}/")
            .route(web::get().to(handlers::edit_comment_form))
            .route(web::post().to(handlers::update_comment)),
    )
    .route(
        "/posts/{post_id}/delete_comment/{comment_id}/",
        web::post().to(handlers::delete_comment),
    )
    // Accounts
    .route("/auth/registration/", web::post().to(auth::register))
    .route("/auth/login/", web::post().to(auth::login))
    // Static pages
    .route("/pages/about/", web::get().to(pages::about))
    .route("/pages/rules/", web::get().to(pages::rules))
    // Administration
    .service(
        web::scope("/admin")
            .service(
                web::resource("/categories/")
                    .route(web::get().to(admin::list_categories))
                    .route(web::post().to(admin::create_category)),
            )
            .service(
                web::resource("/categories/{slug}/")
                    .route(web::put().to(admin::update_category))
                    .route(web::delete().to(admin::delete_category)),
            )
            .service(
                web::resource("/locations/")
                    .route(web::get().to(admin::list_locations))
                    .route(web::post().to(admin::create_location)),
            )
            .service(
                web::resource("/locations/{location_id}/")
                    .route(web::put().to(admin::update_location))
                    .route(web::delete().to(admin::delete_location)),
            ),
    )
    .default_service(web::to(pages::not_found));
}
