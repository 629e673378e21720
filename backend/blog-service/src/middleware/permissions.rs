/// Ownership checks for posts, comments and profiles.
///
/// A mutation is allowed when the requester authored the item or is a
/// superuser. Everyone else gets `Forbidden` and the item is left untouched.
use crate::error::{AppError, Result};
use crate::metrics::DENIED_MUTATIONS_TOTAL;
use crate::middleware::AuthUser;
use crate::models::{Comment, Post, User};

/// Anything with a single owning user.
pub trait Authored {
    fn author_id(&self) -> i64;
    fn kind(&self) -> &'static str;
}

impl Authored for Post {
    fn author_id(&self) -> i64 {
        self.author_id
    }

    fn kind(&self) -> &'static str {
        "post"
    }
}

impl Authored for Comment {
    fn author_id(&self) -> i64 {
        self.author_id
    }

    fn kind(&self) -> &'static str {
        "comment"
    }
}

/// A profile is owned by the account itself.
impl Authored for User {
    fn author_id(&self) -> i64 {
        self.id
    }

    fn kind(&self) -> &'static str {
        "profile"
    }
}

pub fn can_mutate<T: Authored + ?Sized>(actor: &AuthUser, item: &T) -> bool {
    actor.is_superuser || actor.user_id == item.author_id()
}

/// Check that `actor` may perform `action` ("edit", "delete") on `item`.
pub fn check_mutation<T: Authored + ?Sized>(actor: &AuthUser, item: &T, action: &str) -> Result<()> {
    if can_mutate(actor, item) {
        return Ok(());
    }

    DENIED_MUTATIONS_TOTAL
        .with_label_values(&[item.kind(), action])
        .inc();
    tracing::warn!(
        user_id = actor.user_id,
        owner_id = item.author_id(),
        kind = item.kind(),
        action,
        "mutation denied"
    );

    Err(AppError::Forbidden(format!(
        "You don't have permission to {} this {}",
        action,
        item.kind()
    )))
}

/// Superuser-only operations (category and location administration).
pub fn require_superuser(actor: &AuthUser) -> Result<()> {
    if actor.is_superuser {
        Ok(())
    } else {
        Err(AppError::Forbidden("Superuser access required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn actor(user_id: i64, is_superuser: bool) -> AuthUser {
        AuthUser {
            user_id,
            username: format!("user{user_id}"),
            is_superuser,
        }
    }

    fn comment(author_id: i64) -> Comment {
        Comment {
            id: 10,
            text: "Nice shot".into(),
            post_id: 1,
            author_id,
            created_at: Utc::now(),
        }
    }

    fn post(author_id: i64) -> Post {
        Post {
            id: 1,
            title: "Title".into(),
            text: "Body".into(),
            pub_date: Utc::now(),
            image: None,
            author_id,
            location_id: None,
            category_id: None,
            is_published: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn author_may_mutate() {
        assert!(check_mutation(&actor(1, false), &post(1), "edit").is_ok());
        assert!(check_mutation(&actor(1, false), &comment(1), "delete").is_ok());
    }

    #[test]
    fn stranger_is_forbidden() {
        let err = check_mutation(&actor(2, false), &post(1), "delete").unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert!(err.to_string().contains("delete this post"));

        let err = check_mutation(&actor(2, false), &comment(1), "edit").unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn superuser_may_mutate_everything() {
        let admin = actor(99, true);
        assert!(can_mutate(&admin, &post(1)));
        assert!(can_mutate(&admin, &comment(1)));
    }

    #[test]
    fn superuser_gate() {
        assert!(require_superuser(&actor(1, true)).is_ok());
        assert!(matches!(
            require_superuser(&actor(1, false)),
            Err(AppError::Forbidden(_))
        ));
    }
}
