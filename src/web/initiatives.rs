//! Company initiatives (sustainability, community work) with their own
//! statistics strip and section settings.

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
use crate::orm::{company_initiatives, company_initiatives_settings, initiative_statistics};
use crate::seed_data;

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_initiatives)
        .service(view_initiative_statistics)
        .service(view_initiatives_settings)
        .service(admin_list_initiatives)
        .service(create_initiative)
        .service(update_initiative)
        .service(delete_initiative)
        .service(admin_list_initiative_statistics)
        .service(create_initiative_statistic)
        .service(update_initiative_statistic)
        .service(delete_initiative_statistic)
        .service(admin_view_initiatives_settings)
        .service(update_initiatives_settings);
}

const CACHE_INITIATIVES: &str = "company-initiatives";
const CACHE_INITIATIVE_STATISTICS: &str = "initiative-statistics";
const CACHE_INITIATIVES_SETTINGS: &str = "company-initiatives-settings";

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
struct InitiativeForm {
    #[validate(length(min = 1))]
    title_nl: String,
    #[validate(length(min = 1))]
    title_en: String,
    description_nl: String,
    description_en: String,
    image: Option<String>,
    icon: Option<String>,
    order: i32,
    is_active: bool,
}

impl Default for InitiativeForm {
    fn default() -> Self {
        Self {
            title_nl: String::new(),
            title_en: String::new(),
            description_nl: String::new(),
            description_en: String::new(),
            image: None,
            icon: None,
            order: 0,
            is_active: true,
        }
    }
}

impl InitiativeForm {
    fn from_model(initiative: &company_initiatives::Model) -> Self {
        Self {
            title_nl: initiative.title_nl.clone(),
            title_en: initiative.title_en.clone(),
            description_nl: initiative.description_nl.clone(),
            description_en: initiative.description_en.clone(),
            image: initiative.image.clone(),
            icon: initiative.icon.clone(),
            order: initiative.order,
            is_active: initiative.is_active,
        }
    }

    fn create_model(self) -> company_initiatives::ActiveModel {
        let now = Utc::now().naive_utc();
        company_initiatives::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title_nl: Set(self.title_nl.trim().to_owned()),
            title_en: Set(self.title_en.trim().to_owned()),
            description_nl: Set(self.description_nl),
            description_en: Set(self.description_en),
            image: Set(self.image),
            icon: Set(self.icon),
            order: Set(self.order),
            is_active: Set(self.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn update_model(self, existing: &company_initiatives::Model) -> company_initiatives::ActiveModel {
        company_initiatives::ActiveModel {
            id: Set(existing.id.clone()),
            title_nl: Set(self.title_nl.trim().to_owned()),
            title_en: Set(self.title_en.trim().to_owned()),
            description_nl: Set(self.description_nl),
            description_en: Set(self.description_en),
            image: Set(self.image),
            icon: Set(self.icon),
            order: Set(self.order),
            is_active: Set(self.is_active),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
struct InitiativeStatisticForm {
    #[validate(length(min = 1))]
    label_nl: String,
    #[validate(length(min = 1))]
    label_en: String,
    #[validate(length(min = 1))]
    value: String,
    suffix: Option<String>,
    order: i32,
    is_active: bool,
}

impl Default for InitiativeStatisticForm {
    fn default() -> Self {
        Self {
            label_nl: String::new(),
            label_en: String::new(),
            value: String::new(),
            suffix: None,
            order: 0,
            is_active: true,
        }
    }
}

impl InitiativeStatisticForm {
    fn from_model(stat: &initiative_statistics::Model) -> Self {
        Self {
            label_nl: stat.label_nl.clone(),
            label_en: stat.label_en.clone(),
            value: stat.value.clone(),
            suffix: stat.suffix.clone(),
            order: stat.order,
            is_active: stat.is_active,
        }
    }

    fn create_model(self) -> initiative_statistics::ActiveModel {
        let now = Utc::now().naive_utc();
        initiative_statistics::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            label_nl: Set(self.label_nl.trim().to_owned()),
            label_en: Set(self.label_en.trim().to_owned()),
            value: Set(self.value.trim().to_owned()),
            suffix: Set(self.suffix),
            order: Set(self.order),
            is_active: Set(self.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn update_model(self, existing: &initiative_statistics::Model) -> initiative_statistics::ActiveModel {
        initiative_statistics::ActiveModel {
            id: Set(existing.id.clone()),
            label_nl: Set(self.label_nl.trim().to_owned()),
            label_en: Set(self.label_en.trim().to_owned()),
            value: Set(self.value.trim().to_owned()),
            suffix: Set(self.suffix),
            order: Set(self.order),
            is_active: Set(self.is_active),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
    }
}

#[get("/api/company-initiatives")]
async fn view_initiatives() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_INITIATIVES) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let rows = company_initiatives::Entity::find()
        .filter(company_initiatives::Column::IsActive.eq(true))
        .order_by_asc(company_initiatives::Column::Order)
        .order_by_asc(company_initiatives::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load initiatives: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    let payload = serde_json::to_value(&rows).map_err(|e| {
        log::error!("Failed to serialize initiatives: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_INITIATIVES, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/initiative-statistics")]
async fn view_initiative_statistics() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_INITIATIVE_STATISTICS) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let rows = initiative_statistics::Entity::find()
        .filter(initiative_statistics::Column::IsActive.eq(true))
        .order_by_asc(initiative_statistics::Column::Order)
        .order_by_asc(initiative_statistics::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load initiative statistics: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    let payload = serde_json::to_value(&rows).map_err(|e| {
        log::error!("Failed to serialize initiative statistics: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_INITIATIVE_STATISTICS, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/company-initiatives-settings")]
async fn view_initiatives_settings() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_INITIATIVES_SETTINGS) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let settings = company_initiatives_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load initiatives settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_initiatives_settings);

    let payload = serde_json::to_value(&settings).map_err(|e| {
        log::error!("Failed to serialize initiatives settings: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_INITIATIVES_SETTINGS, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/admin/company-initiatives")]
async fn admin_list_initiatives(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let rows = company_initiatives::Entity::find()
        .order_by_asc(company_initiatives::Column::Order)
        .order_by_asc(company_initiatives::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load initiatives: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(rows))
}

#[post("/api/admin/company-initiatives")]
async fn create_initiative(
    ctx: AdminCtx,
    form: web::Json<InitiativeForm>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let form = form.into_inner();
    form.validate().map_err(error::ErrorBadRequest)?;

    let created = form.create_model().insert(get_db_pool()).await.map_err(|e| {
        log::error!("Failed to create initiative: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_INITIATIVES);
    Ok(HttpResponse::Ok().json(created))
}

#[put("/api/admin/company-initiatives/{id}")]
async fn update_initiative(
    ctx: AdminCtx,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = company_initiatives::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load initiative: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Initiative not found"))?;

    let mut base = serde_json::to_value(InitiativeForm::from_model(&existing)).map_err(|e| {
        log::error!("Failed to serialize initiative form: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let form: InitiativeForm = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed initiative payload: {}", e)))?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let updated = form.update_model(&existing).update(db).await.map_err(|e| {
        log::error!("Failed to update initiative: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_INITIATIVES);
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/api/admin/company-initiatives/{id}")]
async fn delete_initiative(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let result = company_initiatives::Entity::delete_by_id(path.into_inner())
        .exec(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to delete initiative: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if result.rows_affected == 0 {
        return Err(error::ErrorNotFound("Initiative not found"));
    }

    cache::invalidate(CACHE_INITIATIVES);
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/admin/initiative-statistics")]
async fn admin_list_initiative_statistics(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let rows = initiative_statistics::Entity::find()
        .order_by_asc(initiative_statistics::Column::Order)
        .order_by_asc(initiative_statistics::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load initiative statistics: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(rows))
}

#[post("/api/admin/initiative-statistics")]
async fn create_initiative_statistic(
    ctx: AdminCtx,
    form: web::Json<InitiativeStatisticForm>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let form = form.into_inner();
    form.validate().map_err(error::ErrorBadRequest)?;

    let created = form.create_model().insert(get_db_pool()).await.map_err(|e| {
        log::error!("Failed to create initiative statistic: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_INITIATIVE_STATISTICS);
    Ok(HttpResponse::Ok().json(created))
}

#[put("/api/admin/initiative-statistics/{id}")]
async fn update_initiative_statistic(
    ctx: AdminCtx,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = initiative_statistics::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load initiative statistic: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Initiative statistic not found"))?;

    let mut base =
        serde_json::to_value(InitiativeStatisticForm::from_model(&existing)).map_err(|e| {
            log::error!("Failed to serialize initiative statistic form: {}", e);
            error::ErrorInternalServerError("Serialization error")
        })?;
    super::merge_patch(&mut base, payload.into_inner());
    let form: InitiativeStatisticForm = serde_json::from_value(base).map_err(|e| {
        error::ErrorBadRequest(format!("Malformed initiative statistic payload: {}", e))
    })?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let updated = form.update_model(&existing).update(db).await.map_err(|e| {
        log::error!("Failed to update initiative statistic: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_INITIATIVE_STATISTICS);
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/api/admin/initiative-statistics/{id}")]
async fn delete_initiative_statistic(
    ctx: AdminCtx,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let result = initiative_statistics::Entity::delete_by_id(path.into_inner())
        .exec(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to delete initiative statistic: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if result.rows_affected == 0 {
        return Err(error::ErrorNotFound("Initiative statistic not found"));
    }

    cache::invalidate(CACHE_INITIATIVE_STATISTICS);
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/admin/company-initiatives-settings")]
async fn admin_view_initiatives_settings(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let settings = company_initiatives_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load initiatives settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_initiatives_settings);
    Ok(HttpResponse::Ok().json(settings))
}

#[put("/api/admin/company-initiatives-settings")]
async fn update_initiatives_settings(
    ctx: AdminCtx,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = company_initiatives_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load initiatives settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    let exists = existing.is_some();

    let base_model = existing.unwrap_or_else(seed_data::default_initiatives_settings);
    let mut base = serde_json::to_value(&base_model).map_err(|e| {
        log::error!("Failed to serialize initiatives settings: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let mut merged: company_initiatives_settings::Model = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed initiatives settings: {}", e)))?;
    merged.id = SINGLETON_ID.to_owned();
    merged.updated_at = Utc::now().naive_utc();

    let row = seed_data::initiatives_settings_row(merged);
    let saved = if exists {
        row.update(db).await
    } else {
        row.insert(db).await
    }
    .map_err(|e| {
        log::error!("Failed to store initiatives settings: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_INITIATIVES_SETTINGS);
    Ok(HttpResponse::Ok().json(saved))
}
