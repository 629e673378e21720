/// Blog Service Library
///
/// A blog platform: users publish posts tagged with categories and locations,
/// other users comment, and content is gated by publication flags and
/// scheduled publish dates.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `routes`: the route table shared by the binary and HTTP tests
/// - `models`: posts, comments, categories, locations and users
/// - `services`: visibility rules, pagination and content operations
/// - `db`: connection pool, migrations and repositories
/// - `middleware`: authentication, ownership guard and request metrics
/// - `security`: password hashing and access tokens
/// - `error`: error types and handling
/// - `config`: configuration management
/// - `metrics`: Prometheus collectors
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod security;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
