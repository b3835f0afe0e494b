//! Newsletter subscriptions: public subscribe/unsubscribe and the admin
//! subscriber list.
//!
//! Unsubscribing works by token, not by email, so a mailing link is the
//! only thing that can deactivate a subscription. The token never
//! appears in API responses.

use actix_web::{error, get, post, web, Error, HttpResponse};
use chrono::Utc;
use rand::Rng;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::constants::UNSUBSCRIBE_TOKEN_LENGTH;
use crate::db::get_db_pool;
use crate::middleware::AdminCtx;
use crate::orm::newsletter_subscriptions;

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(subscribe)
        .service(unsubscribe)
        .service(admin_list_subscribers);
}

fn generate_unsubscribe_token() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(UNSUBSCRIBE_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

#[derive(Debug, Deserialize)]
struct SubscribeForm {
    email: String,
}

#[post("/api/newsletter/subscribe")]
async fn subscribe(form: web::Json<SubscribeForm>) -> Result<HttpResponse, Error> {
    let db = get_db_pool();
    let email = form.into_inner().email.trim().to_lowercase();
    if !validator::validate_email(&email) {
        return Err(error::ErrorBadRequest("Invalid email address"));
    }

    let existing = newsletter_subscriptions::Entity::find()
        .filter(newsletter_subscriptions::Column::Email.eq(email.clone()))
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to look up subscription: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    let subscription = match existing {
        Some(row) if row.is_active => {
            return Err(error::ErrorConflict("This email is already subscribed"));
        }
        // A returning subscriber keeps the row and its token.
        Some(row) => newsletter_subscriptions::ActiveModel {
            id: Set(row.id),
            is_active: Set(true),
            subscribed_at: Set(Utc::now().naive_utc()),
            unsubscribed_at: Set(None),
            ..Default::default()
        }
        .update(db)
        .await,
        None => newsletter_subscriptions::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            email: Set(email),
            is_active: Set(true),
            unsubscribe_token: Set(generate_unsubscribe_token()),
            subscribed_at: Set(Utc::now().naive_utc()),
            unsubscribed_at: Set(None),
        }
        .insert(db)
        .await,
    }
    .map_err(|e| {
        log::error!("Failed to store subscription: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(subscription))
}

#[derive(Debug, Deserialize)]
struct UnsubscribeForm {
    token: String,
}

#[post("/api/newsletter/unsubscribe")]
async fn unsubscribe(form: web::Json<UnsubscribeForm>) -> Result<HttpResponse, Error> {
    let db = get_db_pool();
    let token = form.into_inner().token;
    if token.is_empty() {
        return Err(error::ErrorNotFound("Unknown unsubscribe token"));
    }

    let subscription = newsletter_subscriptions::Entity::find()
        .filter(newsletter_subscriptions::Column::UnsubscribeToken.eq(token))
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to look up subscription: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Unknown unsubscribe token"))?;

    // Clicking the link twice is fine; the first click's timestamp stays.
    if subscription.is_active {
        newsletter_subscriptions::ActiveModel {
            id: Set(subscription.id),
            is_active: Set(false),
            unsubscribed_at: Set(Some(Utc::now().naive_utc())),
            ..Default::default()
        }
        .update(db)
        .await
        .map_err(|e| {
            log::error!("Failed to store unsubscription: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "You have been unsubscribed" })))
}

#[get("/api/admin/newsletter")]
async fn admin_list_subscribers(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let subscribers = newsletter_subscriptions::Entity::find()
        .order_by_desc(newsletter_subscriptions::Column::SubscribedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load subscribers: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(subscribers))
}
