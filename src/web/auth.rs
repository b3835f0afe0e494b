//! Login, logout, session introspection and password reset.
//!
//! Credential checks live in `crate::session`; these handlers only
//! translate them to HTTP. Login failures are uniform so the response
//! never reveals whether an account exists, and forgot-password always
//! answers 200 for the same reason.

use actix_web::{error, get, post, web, Error, HttpResponse};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;
use serde_json::json;

use crate::db::get_db_pool;
use crate::email;
use crate::middleware::AdminCtx;
use crate::orm::users;
use crate::session;

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(login)
        .service(logout)
        .service(view_session)
        .service(forgot_password)
        .service(reset_password);
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    email: String,
    password: String,
}

#[post("/api/auth/login")]
async fn login(form: web::Json<LoginForm>) -> Result<HttpResponse, Error> {
    let db = get_db_pool();
    let form = form.into_inner();

    let user = session::authenticate(db, &form.email, &form.password)
        .await
        .map_err(|e| {
            log::error!("Failed to authenticate: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorUnauthorized("Invalid email or password"))?;

    // Login metadata only; this is not a content edit.
    let user = users::ActiveModel {
        id: Set(user.id),
        last_login_at: Set(Some(Utc::now().naive_utc())),
        ..Default::default()
    }
    .update(db)
    .await
    .map_err(|e| {
        log::error!("Failed to stamp last login: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok()
        .cookie(session::session_cookie(&user.id))
        .json(user))
}

#[post("/api/auth/logout")]
async fn logout() -> Result<HttpResponse, Error> {
    Ok(HttpResponse::Ok()
        .cookie(session::logout_cookie())
        .json(json!({ "success": true })))
}

#[get("/api/auth/session")]
async fn view_session(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    let user = ctx.require_auth()?;
    Ok(HttpResponse::Ok().json(user))
}

#[derive(Debug, Deserialize)]
struct ForgotPasswordForm {
    email: String,
}

#[post("/api/auth/forgot-password")]
async fn forgot_password(form: web::Json<ForgotPasswordForm>) -> Result<HttpResponse, Error> {
    let db = get_db_pool();
    let email_address = form.into_inner().email.trim().to_lowercase();

    let user = users::Entity::find()
        .filter(users::Column::Email.eq(email_address))
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to look up account: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .filter(|user| user.is_active);

    if let Some(user) = user {
        let name = user
            .first_name
            .clone()
            .unwrap_or_else(|| user.email.clone());
        let to = user.email.clone();
        let token = session::issue_reset_token(db, user).await.map_err(|e| {
            log::error!("Failed to issue reset token: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
        if let Err(e) = email::templates::send_password_reset_email(db, &to, &name, &token).await {
            log::error!("Failed to send password reset email: {}", e);
        }
    }

    // Identical answer whether or not the account exists.
    Ok(HttpResponse::Ok().json(json!({
        "message": "If an account exists with this email, a password reset link has been sent."
    })))
}

#[derive(Debug, Deserialize)]
struct ResetPasswordForm {
    token: String,
    password: String,
}

#[post("/api/auth/reset-password")]
async fn reset_password(form: web::Json<ResetPasswordForm>) -> Result<HttpResponse, Error> {
    let db = get_db_pool();
    let form = form.into_inner();

    if form.password.chars().count() < 8 {
        return Err(error::ErrorBadRequest(
            "Password must be at least 8 characters long",
        ));
    }

    let hash = session::hash_password(&form.password).map_err(|e| {
        log::error!("Failed to hash password: {}", e);
        error::ErrorInternalServerError("Hashing error")
    })?;

    session::consume_reset_token(db, &form.token, &hash)
        .await
        .map_err(|e| {
            log::error!("Failed to consume reset token: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorBadRequest("Invalid or expired reset token"))?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Password has been reset" })))
}
