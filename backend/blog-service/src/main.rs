use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use blog_service::db::{create_pool, run_migrations};
use blog_service::middleware::{JwtAuthMiddleware, MetricsMiddleware};
use blog_service::security::JwtKeys;
use blog_service::services::AccountService;
use blog_service::{routes, Config};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable; waiting for Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing(production: bool) {
    let (json, plain) = if production {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into()),
        )
        .with(json)
        .with(plain)
        .init();
}

fn build_cors(allowed_origins: &str) -> Cors {
    let mut cors = Cors::default();
    for origin in allowed_origins.split(',') {
        let origin = origin.trim();
        if origin.is_empty() {
            continue;
        }
        if origin == "*" {
            cors = cors.allow_any_origin();
        } else {
            cors = cors.allowed_origin(origin);
        }
    }
    cors.allow_any_method().allow_any_header().max_age(3600)
}

/// Blog Service
///
/// Serves the blog's JSON API: feeds, post detail, authoring of posts and
/// comments, profiles, registration/login and category/location
/// administration.
///
/// Runs on port 8000 unless `BLOG_SERVICE_PORT` says otherwise; see
/// `Config::from_env` for the full list of settings.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to load configuration")?;

    init_tracing(config.app.is_production());

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(env = %config.app.env, "environment");

    let db_pool = create_pool(&config.database)
        .await
        .context("Failed to connect to PostgreSQL")?;

    run_migrations(&db_pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("database migrations applied");

    if let Some(username) = config.app.bootstrap_superuser.as_deref() {
        AccountService::new(db_pool.clone())
            .promote_superuser(username)
            .await
            .with_context(|| format!("Failed to grant superuser rights to '{}'", username))?;
    }

    let jwt_keys = Arc::new(JwtKeys::from_secret(
        config.auth.jwt_secret.as_bytes(),
        config.auth.jwt_expiry_hours,
    ));

    let bind_address = config.bind_address();
    let allowed_origins = config.cors.allowed_origins.clone();
    let http_pool = db_pool.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(http_pool.clone()))
            .app_data(web::Data::from(jwt_keys.clone()))
            .wrap(JwtAuthMiddleware::new(jwt_keys.clone()))
            .wrap(MetricsMiddleware)
            .wrap(build_cors(&allowed_origins))
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(routes::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .workers(config.app.workers)
    .run();

    tracing::info!(address = %bind_address, "HTTP server is running");

    let server_handle = server.handle();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    tokio::select! {
        result = server => {
            result.context("HTTP server failed")?;
        }
        _ = &mut shutdown => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
        }
    }

    db_pool.close().await;
    tracing::info!("blog-service shutting down");
    Ok(())
}
