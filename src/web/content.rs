//! Hero and about sections of the home page, plus the about-us page.
//!
//! All three are singleton rows under the fixed id; public reads fall
//! back to the built-in defaults when the row does not exist yet.

use actix_web::{error, get, put, web, Error, HttpResponse};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait};
use serde_json::Value;
use validator::Validate;

use crate::cache;
use crate::constants::SINGLETON_ID;
use crate::db::get_db_pool;
use crate::editor::{AboutForm, HeroForm};
use crate::middleware::AdminCtx;
use crate::orm::{about_content, about_us_page, hero_content};
use crate::seed_data;

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_hero)
        .service(view_about)
        .service(view_about_us_page)
        .service(admin_view_hero)
        .service(update_hero)
        .service(admin_view_about)
        .service(update_about)
        .service(admin_view_about_us_page)
        .service(update_about_us_page);
}

const CACHE_HERO: &str = "hero-content";
const CACHE_ABOUT: &str = "about-content";
const CACHE_ABOUT_US: &str = "about-us-page";

#[get("/api/hero-content")]
async fn view_hero() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_HERO) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let hero = hero_content::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load hero content: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_hero);

    let payload = serde_json::to_value(&hero).map_err(|e| {
        log::error!("Failed to serialize hero content: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_HERO, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/about-content")]
async fn view_about() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_ABOUT) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let about = about_content::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load about content: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_about);

    let payload = serde_json::to_value(&about).map_err(|e| {
        log::error!("Failed to serialize about content: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_ABOUT, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/about-us-page")]
async fn view_about_us_page() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_ABOUT_US) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let page = about_us_page::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load about us page: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_about_us_page);

    let payload = serde_json::to_value(&page).map_err(|e| {
        log::error!("Failed to serialize about us page: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_ABOUT_US, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/admin/hero-content")]
async fn admin_view_hero(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let hero = hero_content::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load hero content: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_hero);
    Ok(HttpResponse::Ok().json(hero))
}

#[put("/api/admin/hero-content")]
async fn update_hero(ctx: AdminCtx, payload: web::Json<Value>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = hero_content::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load hero content: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    let base_form = match existing.as_ref() {
        Some(hero) => HeroForm::from_model(hero),
        None => HeroForm::from_model(&seed_data::default_hero()),
    };
    let mut base = serde_json::to_value(&base_form).map_err(|e| {
        log::error!("Failed to serialize hero form: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let form: HeroForm = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed hero payload: {}", e)))?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let row = form.into_model(existing.as_ref());
    let saved = if existing.is_some() {
        row.update(db).await
    } else {
        row.insert(db).await
    }
    .map_err(|e| {
        log::error!("Failed to store hero content: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_HERO);
    Ok(HttpResponse::Ok().json(saved))
}

#[get("/api/admin/about-content")]
async fn admin_view_about(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let about = about_content::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load about content: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_about);
    Ok(HttpResponse::Ok().json(about))
}

#[put("/api/admin/about-content")]
async fn update_about(ctx: AdminCtx, payload: web::Json<Value>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = about_content::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load about content: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    let base_form = match existing.as_ref() {
        Some(about) => AboutForm::from_model(about),
        None => AboutForm::from_model(&seed_data::default_about()),
    };
    let mut base = serde_json::to_value(&base_form).map_err(|e| {
        log::error!("Failed to serialize about form: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let form: AboutForm = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed about payload: {}", e)))?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let row = form.into_model(existing.as_ref());
    let saved = if existing.is_some() {
        row.update(db).await
    } else {
        row.insert(db).await
    }
    .map_err(|e| {
        log::error!("Failed to store about content: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_ABOUT);
    Ok(HttpResponse::Ok().json(saved))
}

#[get("/api/admin/about-us-page")]
async fn admin_view_about_us_page(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let page = about_us_page::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load about us page: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_about_us_page);
    Ok(HttpResponse::Ok().json(page))
}

#[put("/api/admin/about-us-page")]
async fn update_about_us_page(
    ctx: AdminCtx,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = about_us_page::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load about us page: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    let exists = existing.is_some();

    let base_model = existing.unwrap_or_else(seed_data::default_about_us_page);
    let mut base = serde_json::to_value(&base_model).map_err(|e| {
        log::error!("Failed to serialize about us page: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let mut merged: about_us_page::Model = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed page payload: {}", e)))?;
    merged.id = SINGLETON_ID.to_owned();
    merged.updated_at = Utc::now().naive_utc();

    let row = seed_data::about_us_page_row(merged);
    let saved = if exists {
        row.update(db).await
    } else {
        row.insert(db).await
    }
    .map_err(|e| {
        log::error!("Failed to store about us page: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_ABOUT_US);
    Ok(HttpResponse::Ok().json(saved))
}
