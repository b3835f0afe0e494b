//! Free-form site settings, persisted by key through [`crate::site_config`].

use actix_web::{delete, error, get, put, web, Error, HttpResponse};
use sea_orm::{EntityTrait, QueryOrder};
use serde::Deserialize;
use validator::Validate;

use crate::cache;
use crate::db::get_db_pool;
use crate::middleware::AdminCtx;
use crate::orm::site_settings;
use crate::site_config;

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_site_settings)
        .service(admin_list_site_settings)
        .service(upsert_site_setting)
        .service(delete_site_setting);
}

const CACHE_SITE_SETTINGS: &str = "site-settings";

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct SiteSettingForm {
    #[validate(length(min = 1))]
    key: String,
    value: String,
    category: Option<String>,
}

#[get("/api/site-settings")]
async fn view_site_settings() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_SITE_SETTINGS) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let rows = site_settings::Entity::find()
        .order_by_asc(site_settings::Column::Key)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load site settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    let payload = serde_json::to_value(&rows).map_err(|e| {
        log::error!("Failed to serialize site settings: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_SITE_SETTINGS, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/admin/site-settings")]
async fn admin_list_site_settings(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let rows = site_settings::Entity::find()
        .order_by_asc(site_settings::Column::Key)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load site settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(rows))
}

#[put("/api/admin/site-settings")]
async fn upsert_site_setting(
    ctx: AdminCtx,
    form: web::Json<SiteSettingForm>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let form = form.into_inner();
    form.validate().map_err(error::ErrorBadRequest)?;

    let stored = site_config::set(
        get_db_pool(),
        form.key.trim(),
        &form.value,
        form.category.as_deref(),
    )
    .await
    .map_err(|e| {
        log::error!("Failed to store site setting: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_SITE_SETTINGS);
    Ok(HttpResponse::Ok().json(stored))
}

#[delete("/api/admin/site-settings/{key}")]
async fn delete_site_setting(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let removed = site_config::remove(get_db_pool(), &path.into_inner())
        .await
        .map_err(|e| {
            log::error!("Failed to delete site setting: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if !removed {
        return Err(error::ErrorNotFound("Setting not found"));
    }

    cache::invalidate(CACHE_SITE_SETTINGS);
    Ok(HttpResponse::NoContent().finish())
}
