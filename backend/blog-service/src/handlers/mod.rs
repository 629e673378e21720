/// HTTP handlers for blog-service
///
/// Handlers translate requests into service calls and render JSON:
/// - Feed: home page and category listings
/// - Posts / comments / profile: reading and authoring content
/// - Auth: registration and token login
/// - Admin: categories and locations
/// - Pages / health: static documents and health checks
pub mod admin;
pub mod auth;
pub mod comments;
pub mod feed;
pub mod health;
pub mod pages;
pub mod posts;
pub mod profile;

use crate::error::{AppError, Result};

pub use comments::{add_comment, delete_comment, edit_comment_form, update_comment};
pub use feed::{category_posts, index};
pub use posts::{create_post, create_post_form, delete_post, edit_post_form, post_detail, update_post};
pub use profile::{edit_profile_form, profile, update_profile};

/// Trimmed value of a required text field; whitespace-only input is rejected.
pub(crate) fn required<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{}: this field may not be blank", field)));
    }
    Ok(value)
}
