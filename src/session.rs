//! Session and credential handling.
//!
//! The admin session is deliberately plain: the `admin_session` cookie
//! carries the user id, which every request resolves directly against
//! the `users` table. Passwords are argon2 hashes; password reset works
//! through a random 64-character token with a one-hour expiry stored on
//! the user row.

use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use once_cell::sync::Lazy;
use rand::Rng;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};

use crate::app_config;
use crate::constants::{RESET_TOKEN_LENGTH, RESET_TOKEN_TTL_HOURS, SESSION_COOKIE};
use crate::orm::users;

static ARGON2: Lazy<Argon2<'static>> = Lazy::new(Argon2::default);

pub fn get_argon2() -> &'static Argon2<'static> {
    &ARGON2
}

/// Hashes a password for storage with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    Ok(get_argon2()
        .hash_password(password.as_bytes(), &SaltString::generate(&mut OsRng))?
        .to_string())
}

/// Constant-time verification against a stored hash. An unparseable
/// hash counts as a mismatch rather than an error.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => get_argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Resolves the `admin_session` cookie to its user. Missing cookie,
/// unknown id and deactivated account all resolve to None.
pub async fn current_user(
    req: &HttpRequest,
    db: &DatabaseConnection,
) -> Result<Option<users::Model>, DbErr> {
    let user_id = match req.cookie(SESSION_COOKIE) {
        Some(cookie) => cookie.value().to_owned(),
        None => return Ok(None),
    };
    if user_id.is_empty() {
        return Ok(None);
    }

    let user = users::Entity::find_by_id(user_id).one(db).await?;
    Ok(user.filter(|user| user.is_active))
}

/// Checks credentials for login. Wrong email, wrong password and
/// deactivated accounts are indistinguishable to the caller.
pub async fn authenticate(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<Option<users::Model>, DbErr> {
    let user = users::Entity::find()
        .filter(users::Column::Email.eq(email.trim().to_lowercase()))
        .one(db)
        .await?;

    let user = match user {
        Some(user) if user.is_active => user,
        _ => return Ok(None),
    };

    if verify_password(password, &user.password) {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

/// Session cookie for a logged-in user: HttpOnly, SameSite=Lax, secure
/// per config.
pub fn session_cookie(user_id: &str) -> Cookie<'static> {
    let security = app_config::security();
    Cookie::build(SESSION_COOKIE, user_id.to_owned())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(security.secure_cookies)
        .max_age(CookieDuration::days(i64::from(security.session_max_age_days)))
        .finish()
}

/// Replacement cookie that logs the browser out.
pub fn logout_cookie() -> Cookie<'static> {
    let security = app_config::security();
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(security.secure_cookies)
        .max_age(CookieDuration::ZERO)
        .finish()
}

/// Generates a password reset token.
pub fn generate_reset_token() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RESET_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Stores a fresh reset token with a one-hour expiry on the user row
/// and returns the token.
pub async fn issue_reset_token(
    db: &DatabaseConnection,
    user: users::Model,
) -> Result<String, DbErr> {
    let token = generate_reset_token();
    let expiry = Utc::now().naive_utc() + Duration::hours(RESET_TOKEN_TTL_HOURS);

    let mut active: users::ActiveModel = user.into();
    active.reset_token = Set(Some(token.clone()));
    active.reset_token_expiry = Set(Some(expiry));
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(db).await?;

    Ok(token)
}

/// Consumes a reset token: verifies it exists and has not expired, sets
/// the new password hash, and clears both token and expiry. Returns the
/// updated user, or None for unknown/expired tokens.
pub async fn consume_reset_token(
    db: &DatabaseConnection,
    token: &str,
    password_hash: &str,
) -> Result<Option<users::Model>, DbErr> {
    if token.is_empty() {
        return Ok(None);
    }

    let user = users::Entity::find()
        .filter(users::Column::ResetToken.eq(token))
        .one(db)
        .await?;

    let user = match user {
        Some(user) => user,
        None => return Ok(None),
    };

    match user.reset_token_expiry {
        Some(expiry) if expiry > Utc::now().naive_utc() => {}
        _ => return Ok(None),
    }

    let mut active: users::ActiveModel = user.into();
    active.password = Set(password_hash.to_owned());
    active.reset_token = Set(None);
    active.reset_token_expiry = Set(None);
    active.updated_at = Set(Utc::now().naive_utc());
    let updated = active.update(db).await?;

    Ok(Some(updated))
}
