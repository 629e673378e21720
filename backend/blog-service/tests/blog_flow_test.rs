//! Integration Tests: visibility, pagination and ownership against PostgreSQL
//!
//! Coverage:
//! - Scheduled and unpublished posts stay out of public feeds
//! - Unpublished categories hide their posts
//! - Unpublishing or deleting a category/location after posting
//! - Authors see their own hidden posts on their profile
//! - Deleting a post removes its comments
//! - Page slicing and the empty page past the end
//! - Non-authors cannot edit or delete posts and comments
//! - Registration conflicts and login failures
//!
//! Requires Docker; run with `cargo test -- --ignored`.

mod common;

use blog_service::db::category_repo::CategoryFields;
use blog_service::db::comment_repo;
use blog_service::db::post_repo::PostFields;
use blog_service::error::AppError;
use blog_service::models::PostEntry;
use blog_service::security::JwtKeys;
use blog_service::services::accounts::Registration;
use blog_service::services::{
    AccountService, CatalogService, CommentService, Page, PageRequest, PostService,
    ProfileService,
};
use chrono::{Duration, Utc};
use common::{auth, create_category, create_location, create_post, create_user, SeedPost};

fn ids(page: &Page<PostEntry>) -> Vec<i64> {
    page.items.iter().map(|entry| entry.post.id).collect()
}

#[tokio::test]
#[ignore = "Requires Docker for PostgreSQL"]
async fn scheduled_and_unpublished_posts_are_hidden_from_home_feed() {
    let db = common::start_postgres().await;
    let now = Utc::now();
    let author = create_user(&db.pool, "author").await;

    let visible = create_post(&db.pool, &author, SeedPost::new("visible", now - Duration::hours(1))).await;
    create_post(&db.pool, &author, SeedPost::new("scheduled", now + Duration::days(1))).await;
    create_post(
        &db.pool,
        &author,
        SeedPost {
            is_published: false,
            ..SeedPost::new("draft", now - Duration::hours(2))
        },
    )
    .await;

    let hidden_location = create_location(&db.pool, "Atlantis", false).await;
    create_post(
        &db.pool,
        &author,
        SeedPost {
            location_id: Some(hidden_location.id),
            ..SeedPost::new("hidden place", now - Duration::hours(3))
        },
    )
    .await;

    let page = PostService::new(db.pool.clone())
        .home_feed(PageRequest::new(1), now)
        .await
        .unwrap();

    let ids: Vec<i64> = page.items.iter().map(|entry| entry.post.id).collect();
    assert_eq!(ids, vec![visible.id]);
    assert_eq!(page.total_count, 1);
}

#[tokio::test]
#[ignore = "Requires Docker for PostgreSQL"]
async fn unpublished_category_hides_its_posts() {
    let db = common::start_postgres().await;
    let now = Utc::now();
    let author = create_user(&db.pool, "author").await;
    let travel = create_category(&db.pool, "travel", true).await;
    let secret = create_category(&db.pool, "secret", false).await;

    let in_travel = create_post(
        &db.pool,
        &author,
        SeedPost {
            category_id: Some(travel.id),
            ..SeedPost::new("trip", now - Duration::minutes(5))
        },
    )
    .await;
    create_post(
        &db.pool,
        &author,
        SeedPost {
            category_id: Some(secret.id),
            ..SeedPost::new("classified", now - Duration::minutes(5))
        },
    )
    .await;

    let service = PostService::new(db.pool.clone());

    let feed = service
        .category_feed("travel", PageRequest::new(1), now)
        .await
        .unwrap();
    assert_eq!(feed.category.slug, "travel");
    assert_eq!(feed.page_obj.items.len(), 1);
    assert_eq!(feed.page_obj.items[0].post.id, in_travel.id);

    let err = service
        .category_feed("secret", PageRequest::new(1), now)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let home = service.home_feed(PageRequest::new(1), now).await.unwrap();
    assert!(home.items.iter().all(|entry| entry.post.category_id != Some(secret.id)));
}

#[tokio::test]
#[ignore = "Requires Docker for PostgreSQL"]
async fn catalog_changes_after_posting_apply_to_existing_posts() {
    let db = common::start_postgres().await;
    let now = Utc::now();
    let author = create_user(&db.pool, "author").await;
    let reader = create_user(&db.pool, "reader").await;
    let staff = create_user(&db.pool, "staff").await;
    let mut admin = auth(&staff);
    admin.is_superuser = true;

    let travel = create_category(&db.pool, "travel", true).await;
    let harbor = create_location(&db.pool, "Harbor", true).await;
    let post = create_post(
        &db.pool,
        &author,
        SeedPost {
            category_id: Some(travel.id),
            location_id: Some(harbor.id),
            ..SeedPost::new("by the sea", now - Duration::hours(1))
        },
    )
    .await;

    let posts = PostService::new(db.pool.clone());
    let catalog = CatalogService::new(db.pool.clone());
    let reader = auth(&reader);

    let home = posts.home_feed(PageRequest::new(1), now).await.unwrap();
    assert_eq!(ids(&home), vec![post.id]);

    // Category unpublished
    let fields = |is_published| CategoryFields {
        title: "Travel",
        description: "",
        slug: "travel",
        is_published,
    };
    catalog.update_category(&admin, "travel", &fields(false)).await.unwrap();

    let home = posts.home_feed(PageRequest::new(1), now).await.unwrap();
    assert!(home.items.is_empty());
    assert!(matches!(
        posts.category_feed("travel", PageRequest::new(1), now).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        posts.post_detail(post.id, Some(&reader), now).await,
        Err(AppError::NotFound(_))
    ));
    assert!(posts.post_detail(post.id, Some(&auth(&author)), now).await.is_ok());

    catalog.update_category(&admin, "travel", &fields(true)).await.unwrap();

    // Location unpublished: the category page still loads but drops the post
    catalog
        .update_location(&admin, harbor.id, "Harbor", false)
        .await
        .unwrap();

    let feed = posts
        .category_feed("travel", PageRequest::new(1), now)
        .await
        .unwrap();
    assert!(feed.page_obj.items.is_empty());
    assert_eq!(feed.page_obj.total_count, 0);
    let home = posts.home_feed(PageRequest::new(1), now).await.unwrap();
    assert!(home.items.is_empty());
    assert!(matches!(
        posts.post_detail(post.id, None, now).await,
        Err(AppError::NotFound(_))
    ));

    // Location deleted: the reference is cleared and the post reappears
    catalog.delete_location(&admin, harbor.id).await.unwrap();

    let location_id: Option<i64> = sqlx::query_scalar("SELECT location_id FROM posts WHERE id = $1")
        .bind(post.id)
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(location_id, None);

    let home = posts.home_feed(PageRequest::new(1), now).await.unwrap();
    assert_eq!(ids(&home), vec![post.id]);
    let feed = posts
        .category_feed("travel", PageRequest::new(1), now)
        .await
        .unwrap();
    assert_eq!(feed.page_obj.items.len(), 1);
    assert!(posts.post_detail(post.id, Some(&reader), now).await.is_ok());
}

#[tokio::test]
#[ignore = "Requires Docker for PostgreSQL"]
async fn author_sees_own_hidden_posts_on_profile() {
    let db = common::start_postgres().await;
    let now = Utc::now();
    let author = create_user(&db.pool, "writer").await;
    let reader = create_user(&db.pool, "reader").await;

    create_post(&db.pool, &author, SeedPost::new("public", now - Duration::hours(1))).await;
    let draft = create_post(
        &db.pool,
        &author,
        SeedPost {
            is_published: false,
            ..SeedPost::new("draft", now - Duration::hours(2))
        },
    )
    .await;
    let scheduled = create_post(&db.pool, &author, SeedPost::new("later", now + Duration::days(2))).await;

    let profiles = ProfileService::new(db.pool.clone());

    let own = profiles
        .profile("writer", Some(&auth(&author)), PageRequest::new(1), now)
        .await
        .unwrap();
    assert_eq!(own.page_obj.total_count, 3);
    let doc = serde_json::to_value(&own).unwrap();
    assert_eq!(doc["profile"]["username"], "writer");
    assert!(doc["profile"].get("email").is_none());
    assert!(own.page_obj.items.iter().any(|entry| entry.post.id == draft.id));

    let other = profiles
        .profile("writer", Some(&auth(&reader)), PageRequest::new(1), now)
        .await
        .unwrap();
    assert_eq!(other.page_obj.total_count, 1);

    let anonymous = profiles
        .profile("writer", None, PageRequest::new(1), now)
        .await
        .unwrap();
    assert_eq!(anonymous.page_obj.total_count, 1);

    let posts = PostService::new(db.pool.clone());
    assert!(posts.post_detail(scheduled.id, Some(&auth(&author)), now).await.is_ok());
    assert!(matches!(
        posts.post_detail(scheduled.id, Some(&auth(&reader)), now).await,
        Err(AppError::NotFound(_))
    ));

    let missing = profiles
        .profile("nobody", None, PageRequest::new(1), now)
        .await
        .unwrap_err();
    assert!(matches!(missing, AppError::NotFound(_)));
}

#[tokio::test]
#[ignore = "Requires Docker for PostgreSQL"]
async fn deleting_post_removes_its_comments() {
    let db = common::start_postgres().await;
    let now = Utc::now();
    let author = create_user(&db.pool, "author").await;
    let commenter = create_user(&db.pool, "commenter").await;
    let post = create_post(&db.pool, &author, SeedPost::new("discussed", now - Duration::hours(1))).await;

    let comments = CommentService::new(db.pool.clone());
    for text in ["first", "second", "third"] {
        comments
            .add_comment(&auth(&commenter), post.id, text, now)
            .await
            .unwrap();
    }

    let detail = PostService::new(db.pool.clone())
        .post_detail(post.id, None, now)
        .await
        .unwrap();
    assert_eq!(detail.post.comment_count, 3);
    let texts: Vec<&str> = detail.comments.iter().map(|c| c.comment.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);

    PostService::new(db.pool.clone())
        .delete_post(&auth(&author), post.id)
        .await
        .unwrap();

    assert_eq!(comment_repo::count_for_post(&db.pool, post.id).await.unwrap(), 0);
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(&db.pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
#[ignore = "Requires Docker for PostgreSQL"]
async fn pages_slice_the_ordered_feed() {
    let db = common::start_postgres().await;
    let now = Utc::now();
    let author = create_user(&db.pool, "prolific").await;

    for i in 0..25 {
        create_post(
            &db.pool,
            &author,
            SeedPost::new(&format!("post {}", i), now - Duration::minutes(i + 1)),
        )
        .await;
    }

    let service = PostService::new(db.pool.clone());

    let first = service.home_feed(PageRequest::new(1), now).await.unwrap();
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.items[0].post.title, "post 0");
    assert_eq!(first.num_pages, 3);
    assert!(first.has_next);
    assert!(!first.has_previous);

    let third = service.home_feed(PageRequest::new(3), now).await.unwrap();
    let titles: Vec<&str> = third.items.iter().map(|e| e.post.title.as_str()).collect();
    assert_eq!(titles, vec!["post 20", "post 21", "post 22", "post 23", "post 24"]);
    assert!(!third.has_next);

    let beyond = service.home_feed(PageRequest::new(4), now).await.unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_count, 25);
}

#[tokio::test]
#[ignore = "Requires Docker for PostgreSQL"]
async fn non_authors_cannot_mutate_content() {
    let db = common::start_postgres().await;
    let now = Utc::now();
    let author = create_user(&db.pool, "author").await;
    let intruder = create_user(&db.pool, "intruder").await;
    let post = create_post(&db.pool, &author, SeedPost::new("mine", now - Duration::hours(1))).await;

    let posts = PostService::new(db.pool.clone());
    let fields = PostFields {
        title: "defaced",
        text: "defaced",
        pub_date: now,
        image: None,
        location_id: None,
        category_id: None,
        is_published: true,
    };

    assert!(matches!(
        posts.update_post(&auth(&intruder), post.id, &fields).await,
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        posts.delete_post(&auth(&intruder), post.id).await,
        Err(AppError::Forbidden(_))
    ));

    let comments = CommentService::new(db.pool.clone());
    let comment = comments
        .add_comment(&auth(&author), post.id, "author's note", now)
        .await
        .unwrap();
    assert!(matches!(
        comments
            .update_comment(&auth(&intruder), post.id, comment.id, "spam")
            .await,
        Err(AppError::Forbidden(_))
    ));
    assert!(matches!(
        comments
            .delete_comment(&auth(&intruder), post.id, comment.id)
            .await,
        Err(AppError::Forbidden(_))
    ));

    let detail = posts.post_detail(post.id, None, now).await.unwrap();
    assert_eq!(detail.post.post.title, "mine");
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments[0].comment.text, "author's note");

    // A comment addressed through another post does not exist.
    let other = create_post(&db.pool, &author, SeedPost::new("other", now - Duration::hours(1))).await;
    assert!(matches!(
        comments.editable_comment(&auth(&author), other.id, comment.id).await,
        Err(AppError::NotFound(_))
    ));

    let mut moderator = auth(&intruder);
    moderator.is_superuser = true;
    posts.update_post(&moderator, post.id, &fields).await.unwrap();
}

#[tokio::test]
#[ignore = "Requires Docker for PostgreSQL"]
async fn hidden_posts_cannot_be_commented() {
    let db = common::start_postgres().await;
    let now = Utc::now();
    let author = create_user(&db.pool, "author").await;
    let reader = create_user(&db.pool, "reader").await;
    let scheduled = create_post(&db.pool, &author, SeedPost::new("soon", now + Duration::hours(5))).await;

    let comments = CommentService::new(db.pool.clone());
    assert!(matches!(
        comments.add_comment(&auth(&reader), scheduled.id, "early", now).await,
        Err(AppError::NotFound(_))
    ));
    assert!(comments
        .add_comment(&auth(&author), scheduled.id, "reminder", now)
        .await
        .is_ok());
}

#[tokio::test]
#[ignore = "Requires Docker for PostgreSQL"]
async fn registration_and_login() {
    let db = common::start_postgres().await;
    let accounts = AccountService::new(db.pool.clone());
    let keys = JwtKeys::from_secret(b"integration-test-secret-0123456789", 1);

    let registration = Registration {
        username: "newcomer",
        email: "newcomer@example.com",
        password: "travel2024",
        first_name: "New",
        last_name: "Comer",
    };
    let user = accounts.register(&registration).await.unwrap();
    assert_eq!(user.username, "newcomer");

    assert!(matches!(
        accounts.register(&registration).await,
        Err(AppError::Conflict(_))
    ));

    let token = accounts.login(&keys, "newcomer", "travel2024").await.unwrap();
    let claims = keys.validate(&token.access_token).unwrap();
    assert_eq!(claims.sub, user.id.to_string());
    assert!(!claims.is_superuser);

    assert!(matches!(
        accounts.login(&keys, "newcomer", "wrong-pass1").await,
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        accounts.login(&keys, "ghost", "travel2024").await,
        Err(AppError::Unauthorized(_))
    ));

    accounts.promote_superuser("newcomer").await.unwrap();
    let token = accounts.login(&keys, "newcomer", "travel2024").await.unwrap();
    assert!(keys.validate(&token.access_token).unwrap().is_superuser);
}
