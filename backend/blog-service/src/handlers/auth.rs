/// Auth handlers - registration and token login
///
/// There is no server session: logging out means discarding the token.
use crate::error::Result;
use crate::security::JwtKeys;
use crate::services::accounts::Registration;
use crate::services::AccountService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub last_name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

pub async fn register(
    pool: web::Data<PgPool>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = AccountService::new((**pool).clone());
    let user = service
        .register(&Registration {
            username: req.username.trim(),
            email: req.email.trim(),
            password: &req.password,
            first_name: req.first_name.trim(),
            last_name: req.last_name.trim(),
        })
        .await?;

    Ok(HttpResponse::Created().json(user))
}

pub async fn login(
    pool: web::Data<PgPool>,
    keys: web::Data<JwtKeys>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = AccountService::new((**pool).clone());
    let token = service
        .login(&keys, req.username.trim(), &req.password)
        .await?;

    Ok(HttpResponse::Ok().json(token))
}
