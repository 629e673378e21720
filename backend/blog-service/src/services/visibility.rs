//! Post visibility rules.
//!
//! A post is publicly visible iff it is published, its publish date has
//! passed, and its category and location (when set) are published. The rule
//! exists twice with the same meaning: `is_publicly_visible` for single posts
//! and `push_public_filter` for feed queries. Authors always see their own
//! posts.

use crate::models::PostEntry;
use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};

/// The publication facts the visibility rule depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityFacts {
    pub is_published: bool,
    pub pub_date: DateTime<Utc>,
    /// `None` when no category is attached
    pub category_published: Option<bool>,
    /// `None` when no location is attached
    pub location_published: Option<bool>,
}

impl From<&PostEntry> for VisibilityFacts {
    fn from(entry: &PostEntry) -> Self {
        Self {
            is_published: entry.post.is_published,
            pub_date: entry.post.pub_date,
            category_published: entry.category_is_published,
            location_published: entry.location_is_published,
        }
    }
}

pub fn is_publicly_visible(facts: &VisibilityFacts, now: DateTime<Utc>) -> bool {
    facts.is_published
        && facts.pub_date <= now
        && facts.category_published.unwrap_or(true)
        && facts.location_published.unwrap_or(true)
}

/// Whether `viewer_id` may read `entry` at `now`.
pub fn can_view(entry: &PostEntry, viewer_id: Option<i64>, now: DateTime<Utc>) -> bool {
    viewer_id == Some(entry.post.author_id)
        || is_publicly_visible(&VisibilityFacts::from(entry), now)
}

/// Appends the public-visibility predicate to a query that joins
/// `posts p LEFT JOIN categories c LEFT JOIN locations l` and already has a
/// `WHERE` clause.
pub fn push_public_filter(qb: &mut QueryBuilder<'_, Postgres>, now: DateTime<Utc>) {
    qb.push(" AND p.is_published = TRUE AND p.pub_date <= ");
    qb.push_bind(now);
    qb.push(
        " AND (p.category_id IS NULL OR c.is_published = TRUE) \
          AND (p.location_id IS NULL OR l.is_published = TRUE)",
    );
}
