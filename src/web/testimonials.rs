//! Customer testimonials and their section settings.

use actix_web::{delete, error, get, post, put, web, Error, HttpResponse};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::cache;
use crate::constants::SINGLETON_ID;
use crate::db::get_db_pool;
use crate::editor::TestimonialForm;
use crate::middleware::AdminCtx;
use crate::orm::{testimonials, testimonials_settings};
use crate::seed_data;

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_testimonials)
        .service(view_testimonials_settings)
        .service(admin_list_testimonials)
        .service(create_testimonial)
        .service(update_testimonial)
        .service(delete_testimonial)
        .service(admin_view_testimonials_settings)
        .service(update_testimonials_settings);
}

const CACHE_TESTIMONIALS: &str = "testimonials";
const CACHE_TESTIMONIALS_SETTINGS: &str = "testimonials-settings";

#[derive(Debug, Default, Deserialize)]
struct TestimonialQuery {
    featured: Option<bool>,
}

#[get("/api/testimonials")]
async fn view_testimonials(query: web::Query<TestimonialQuery>) -> Result<HttpResponse, Error> {
    let featured = query.featured;
    // Only the unfiltered list is cached; ?featured=true is a rarer call.
    if featured.is_none() {
        if let Some(cached) = cache::get(CACHE_TESTIMONIALS) {
            return Ok(HttpResponse::Ok().json(cached));
        }
    }

    let mut select = testimonials::Entity::find()
        .filter(testimonials::Column::IsActive.eq(true));
    if let Some(featured) = featured {
        select = select.filter(testimonials::Column::Featured.eq(featured));
    }
    let rows = select
        .order_by_asc(testimonials::Column::Order)
        .order_by_asc(testimonials::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load testimonials: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    let payload = serde_json::to_value(&rows).map_err(|e| {
        log::error!("Failed to serialize testimonials: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    if featured.is_none() {
        cache::insert(CACHE_TESTIMONIALS, payload.clone());
    }
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/testimonials-settings")]
async fn view_testimonials_settings() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_TESTIMONIALS_SETTINGS) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let settings = testimonials_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load testimonials settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_testimonials_settings);

    let payload = serde_json::to_value(&settings).map_err(|e| {
        log::error!("Failed to serialize testimonials settings: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_TESTIMONIALS_SETTINGS, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/admin/testimonials")]
async fn admin_list_testimonials(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let rows = testimonials::Entity::find()
        .order_by_asc(testimonials::Column::Order)
        .order_by_asc(testimonials::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load testimonials: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(rows))
}

#[post("/api/admin/testimonials")]
async fn create_testimonial(
    ctx: AdminCtx,
    form: web::Json<TestimonialForm>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let form = form.into_inner();
    form.validate().map_err(error::ErrorBadRequest)?;

    let created = form.create_model().insert(get_db_pool()).await.map_err(|e| {
        log::error!("Failed to create testimonial: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_TESTIMONIALS);
    Ok(HttpResponse::Ok().json(created))
}

#[put("/api/admin/testimonials/{id}")]
async fn update_testimonial(
    ctx: AdminCtx,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = testimonials::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load testimonial: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Testimonial not found"))?;

    let mut base = serde_json::to_value(TestimonialForm::from_model(&existing)).map_err(|e| {
        log::error!("Failed to serialize testimonial form: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let form: TestimonialForm = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed testimonial payload: {}", e)))?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let updated = form.update_model(&existing).update(db).await.map_err(|e| {
        log::error!("Failed to update testimonial: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_TESTIMONIALS);
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/api/admin/testimonials/{id}")]
async fn delete_testimonial(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let result = testimonials::Entity::delete_by_id(path.into_inner())
        .exec(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to delete testimonial: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if result.rows_affected == 0 {
        return Err(error::ErrorNotFound("Testimonial not found"));
    }

    cache::invalidate(CACHE_TESTIMONIALS);
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/admin/testimonials-settings")]
async fn admin_view_testimonials_settings(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let settings = testimonials_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load testimonials settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_testimonials_settings);
    Ok(HttpResponse::Ok().json(settings))
}

#[put("/api/admin/testimonials-settings")]
async fn update_testimonials_settings(
    ctx: AdminCtx,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = testimonials_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load testimonials settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    let exists = existing.is_some();

    let base_model = existing.unwrap_or_else(seed_data::default_testimonials_settings);
    let mut base = serde_json::to_value(&base_model).map_err(|e| {
        log::error!("Failed to serialize testimonials settings: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let mut merged: testimonials_settings::Model = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed testimonials settings: {}", e)))?;
    merged.id = SINGLETON_ID.to_owned();
    merged.updated_at = Utc::now().naive_utc();

    let row = seed_data::testimonials_settings_row(merged);
    let saved = if exists {
        row.update(db).await
    } else {
        row.insert(db).await
    }
    .map_err(|e| {
        log::error!("Failed to store testimonials settings: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_TESTIMONIALS_SETTINGS);
    Ok(HttpResponse::Ok().json(saved))
}
