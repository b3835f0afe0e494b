//! Services catalogue and the home-page statistics strip.

use actix_web::{delete, error, get, post, put, web, Error, HttpResponse};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde_json::Value;
use validator::Validate;

use crate::cache;
use crate::constants::SINGLETON_ID;
use crate::db::get_db_pool;
use crate::editor::{ServiceForm, StatisticForm};
use crate::middleware::AdminCtx;
use crate::orm::{services, statistics, statistics_settings};
use crate::seed_data;

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_services)
        .service(view_statistics)
        .service(view_statistics_settings)
        .service(admin_list_services)
        .service(create_service)
        .service(update_service)
        .service(delete_service)
        .service(admin_list_statistics)
        .service(create_statistic)
        .service(update_statistic)
        .service(delete_statistic)
        .service(admin_view_statistics_settings)
        .service(update_statistics_settings);
}

const CACHE_SERVICES: &str = "services";
const CACHE_STATISTICS: &str = "statistics";
const CACHE_STATISTICS_SETTINGS: &str = "statistics-settings";

#[get("/api/services")]
async fn view_services() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_SERVICES) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let rows = services::Entity::find()
        .filter(services::Column::IsActive.eq(true))
        .order_by_asc(services::Column::Order)
        .order_by_asc(services::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load services: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    let payload = serde_json::to_value(&rows).map_err(|e| {
        log::error!("Failed to serialize services: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_SERVICES, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/statistics")]
async fn view_statistics() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_STATISTICS) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let rows = statistics::Entity::find()
        .filter(statistics::Column::IsActive.eq(true))
        .order_by_asc(statistics::Column::Order)
        .order_by_asc(statistics::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load statistics: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    let payload = serde_json::to_value(&rows).map_err(|e| {
        log::error!("Failed to serialize statistics: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_STATISTICS, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/statistics-settings")]
async fn view_statistics_settings() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_STATISTICS_SETTINGS) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let settings = statistics_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load statistics settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_statistics_settings);

    let payload = serde_json::to_value(&settings).map_err(|e| {
        log::error!("Failed to serialize statistics settings: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_STATISTICS_SETTINGS, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/admin/services")]
async fn admin_list_services(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let rows = services::Entity::find()
        .order_by_asc(services::Column::Order)
        .order_by_asc(services::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load services: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(rows))
}

#[post("/api/admin/services")]
async fn create_service(ctx: AdminCtx, form: web::Json<ServiceForm>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let form = form.into_inner();
    form.validate().map_err(error::ErrorBadRequest)?;

    let created = form.create_model().insert(get_db_pool()).await.map_err(|e| {
        log::error!("Failed to create service: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_SERVICES);
    Ok(HttpResponse::Ok().json(created))
}

#[put("/api/admin/services/{id}")]
async fn update_service(
    ctx: AdminCtx,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = services::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load service: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Service not found"))?;

    let mut base = serde_json::to_value(ServiceForm::from_model(&existing)).map_err(|e| {
        log::error!("Failed to serialize service form: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let form: ServiceForm = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed service payload: {}", e)))?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let updated = form.update_model(&existing).update(db).await.map_err(|e| {
        log::error!("Failed to update service: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_SERVICES);
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/api/admin/services/{id}")]
async fn delete_service(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let result = services::Entity::delete_by_id(path.into_inner())
        .exec(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to delete service: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if result.rows_affected == 0 {
        return Err(error::ErrorNotFound("Service not found"));
    }

    cache::invalidate(CACHE_SERVICES);
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/admin/statistics")]
async fn admin_list_statistics(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let rows = statistics::Entity::find()
        .order_by_asc(statistics::Column::Order)
        .order_by_asc(statistics::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load statistics: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(rows))
}

#[post("/api/admin/statistics")]
async fn create_statistic(
    ctx: AdminCtx,
    form: web::Json<StatisticForm>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let form = form.into_inner();
    form.validate().map_err(error::ErrorBadRequest)?;

    let created = form.create_model().insert(get_db_pool()).await.map_err(|e| {
        log::error!("Failed to create statistic: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_STATISTICS);
    Ok(HttpResponse::Ok().json(created))
}

#[put("/api/admin/statistics/{id}")]
async fn update_statistic(
    ctx: AdminCtx,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = statistics::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load statistic: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Statistic not found"))?;

    let mut base = serde_json::to_value(StatisticForm::from_model(&existing)).map_err(|e| {
        log::error!("Failed to serialize statistic form: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let form: StatisticForm = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed statistic payload: {}", e)))?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let updated = form.update_model(&existing).update(db).await.map_err(|e| {
        log::error!("Failed to update statistic: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_STATISTICS);
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/api/admin/statistics/{id}")]
async fn delete_statistic(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let result = statistics::Entity::delete_by_id(path.into_inner())
        .exec(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to delete statistic: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if result.rows_affected == 0 {
        return Err(error::ErrorNotFound("Statistic not found"));
    }

    cache::invalidate(CACHE_STATISTICS);
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/admin/statistics-settings")]
async fn admin_view_statistics_settings(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let settings = statistics_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load statistics settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_statistics_settings);
    Ok(HttpResponse::Ok().json(settings))
}

#[put("/api/admin/statistics-settings")]
async fn update_statistics_settings(
    ctx: AdminCtx,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = statistics_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load statistics settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    let exists = existing.is_some();

    let base_model = existing.unwrap_or_else(seed_data::default_statistics_settings);
    let mut base = serde_json::to_value(&base_model).map_err(|e| {
        log::error!("Failed to serialize statistics settings: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let mut merged: statistics_settings::Model = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed statistics settings: {}", e)))?;
    merged.id = SINGLETON_ID.to_owned();
    merged.updated_at = Utc::now().naive_utc();

    let row = seed_data::statistics_settings_row(merged);
    let saved = if exists {
        row.update(db).await
    } else {
        row.insert(db).await
    }
    .map_err(|e| {
        log::error!("Failed to store statistics settings: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_STATISTICS_SETTINGS);
    Ok(HttpResponse::Ok().json(saved))
}
