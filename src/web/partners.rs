//! Partner logos and the partners section settings.

use actix_web::{delete, error, get, post, put, web, Error, HttpResponse};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::cache;
use crate::constants::SINGLETON_ID;
use crate::db::get_db_pool;
use crate::middleware::AdminCtx;
use crate::orm::{partners, partners_settings};
use crate::seed_data;

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_partners)
        .service(view_partners_settings)
        .service(admin_list_partners)
        .service(create_partner)
        .service(update_partner)
        .service(delete_partner)
        .service(admin_view_partners_settings)
        .service(update_partners_settings);
}

const CACHE_PARTNERS: &str = "partners";
const CACHE_PARTNERS_SETTINGS: &str = "partners-settings";

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
struct PartnerForm {
    #[validate(length(min = 1))]
    name: String,
    logo: Option<String>,
    #[validate(url)]
    website_url: Option<String>,
    description_nl: Option<String>,
    description_en: Option<String>,
    order: i32,
    is_active: bool,
}

impl Default for PartnerForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            logo: None,
            website_url: None,
            description_nl: None,
            description_en: None,
            order: 0,
            is_active: true,
        }
    }
}

impl PartnerForm {
    fn from_model(partner: &partners::Model) -> Self {
        Self {
            name: partner.name.clone(),
            logo: partner.logo.clone(),
            website_url: partner.website_url.clone(),
            description_nl: partner.description_nl.clone(),
            description_en: partner.description_en.clone(),
            order: partner.order,
            is_active: partner.is_active,
        }
    }

    fn create_model(self) -> partners::ActiveModel {
        let now = Utc::now().naive_utc();
        partners::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(self.name.trim().to_owned()),
            logo: Set(self.logo),
            website_url: Set(self.website_url),
            description_nl: Set(self.description_nl),
            description_en: Set(self.description_en),
            order: Set(self.order),
            is_active: Set(self.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn update_model(self, existing: &partners::Model) -> partners::ActiveModel {
        partners::ActiveModel {
            id: Set(existing.id.clone()),
            name: Set(self.name.trim().to_owned()),
            logo: Set(self.logo),
            website_url: Set(self.website_url),
            description_nl: Set(self.description_nl),
            description_en: Set(self.description_en),
            order: Set(self.order),
            is_active: Set(self.is_active),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
    }
}

#[get("/api/partners")]
async fn view_partners() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_PARTNERS) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let rows = partners::Entity::find()
        .filter(partners::Column::IsActive.eq(true))
        .order_by_asc(partners::Column::Order)
        .order_by_asc(partners::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load partners: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    let payload = serde_json::to_value(&rows).map_err(|e| {
        log::error!("Failed to serialize partners: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_PARTNERS, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/partners-settings")]
async fn view_partners_settings() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_PARTNERS_SETTINGS) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let settings = partners_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load partners settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_partners_settings);

    let payload = serde_json::to_value(&settings).map_err(|e| {
        log::error!("Failed to serialize partners settings: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_PARTNERS_SETTINGS, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/admin/partners")]
async fn admin_list_partners(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let rows = partners::Entity::find()
        .order_by_asc(partners::Column::Order)
        .order_by_asc(partners::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load partners: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(rows))
}

#[post("/api/admin/partners")]
async fn create_partner(ctx: AdminCtx, form: web::Json<PartnerForm>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let form = form.into_inner();
    form.validate().map_err(error::ErrorBadRequest)?;

    let created = form.create_model().insert(get_db_pool()).await.map_err(|e| {
        log::error!("Failed to create partner: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_PARTNERS);
    Ok(HttpResponse::Ok().json(created))
}

#[put("/api/admin/partners/{id}")]
async fn update_partner(
    ctx: AdminCtx,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = partners::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load partner: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Partner not found"))?;

    let mut base = serde_json::to_value(PartnerForm::from_model(&existing)).map_err(|e| {
        log::error!("Failed to serialize partner form: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let form: PartnerForm = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed partner payload: {}", e)))?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let updated = form.update_model(&existing).update(db).await.map_err(|e| {
        log::error!("Failed to update partner: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_PARTNERS);
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/api/admin/partners/{id}")]
async fn delete_partner(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let result = partners::Entity::delete_by_id(path.into_inner())
        .exec(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to delete partner: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if result.rows_affected == 0 {
        return Err(error::ErrorNotFound("Partner not found"));
    }

    cache::invalidate(CACHE_PARTNERS);
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/admin/partners-settings")]
async fn admin_view_partners_settings(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let settings = partners_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load partners settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_partners_settings);
    Ok(HttpResponse::Ok().json(settings))
}

#[put("/api/admin/partners-settings")]
async fn update_partners_settings(
    ctx: AdminCtx,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = partners_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load partners settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    let exists = existing.is_some();

    let base_model = existing.unwrap_or_else(seed_data::default_partners_settings);
    let mut base = serde_json::to_value(&base_model).map_err(|e| {
        log::error!("Failed to serialize partners settings: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let mut merged: partners_settings::Model = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed partners settings: {}", e)))?;
    merged.id = SINGLETON_ID.to_owned();
    merged.updated_at = Utc::now().naive_utc();

    let row = seed_data::partners_settings_row(merged);
    let saved = if exists {
        row.update(db).await
    } else {
        row.insert(db).await
    }
    .map_err(|e| {
        log::error!("Failed to store partners settings: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_PARTNERS_SETTINGS);
    Ok(HttpResponse::Ok().json(saved))
}
