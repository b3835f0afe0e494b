//! Section settings: which site sections render, where they appear in
//! navigation, and in what order.

use actix_web::{delete, error, get, post, put, web, Error, HttpResponse};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::cache;
use crate::db::get_db_pool;
use crate::middleware::AdminCtx;
use crate::orm::section_settings;

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_sections)
        .service(admin_list_sections)
        .service(create_section)
        .service(update_section)
        .service(delete_section);
}

const CACHE_SECTIONS: &str = "section-settings";

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
struct SectionForm {
    #[validate(length(min = 1))]
    section_key: String,
    name_nl: Option<String>,
    name_en: Option<String>,
    is_visible: bool,
    show_in_header: bool,
    show_in_footer: bool,
    order: i32,
    route: Option<String>,
}

impl Default for SectionForm {
    fn default() -> Self {
        Self {
            section_key: String::new(),
            name_nl: None,
            name_en: None,
            is_visible: true,
            show_in_header: true,
            show_in_footer: true,
            order: 0,
            route: None,
        }
    }
}

impl SectionForm {
    fn from_model(section: &section_settings::Model) -> Self {
        Self {
            section_key: section.section_key.clone(),
            name_nl: section.name_nl.clone(),
            name_en: section.name_en.clone(),
            is_visible: section.is_visible,
            show_in_header: section.show_in_header,
            show_in_footer: section.show_in_footer,
            order: section.order,
            route: section.route.clone(),
        }
    }

    fn create_model(self) -> section_settings::ActiveModel {
        let now = Utc::now().naive_utc();
        section_settings::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            section_key: Set(self.section_key.trim().to_owned()),
            name_nl: Set(self.name_nl),
            name_en: Set(self.name_en),
            is_visible: Set(self.is_visible),
            show_in_header: Set(self.show_in_header),
            show_in_footer: Set(self.show_in_footer),
            order: Set(self.order),
            route: Set(self.route),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    // The key survives updates; it is how the front-end addresses a section.
    fn update_model(self, existing: &section_settings::Model) -> section_settings::ActiveModel {
        section_settings::ActiveModel {
            id: Set(existing.id.clone()),
            name_nl: Set(self.name_nl),
            name_en: Set(self.name_en),
            is_visible: Set(self.is_visible),
            show_in_header: Set(self.show_in_header),
            show_in_footer: Set(self.show_in_footer),
            order: Set(self.order),
            route: Set(self.route),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
    }
}

#[get("/api/section-settings")]
async fn view_sections() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_SECTIONS) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let rows = section_settings::Entity::find()
        .filter(section_settings::Column::IsVisible.eq(true))
        .order_by_asc(section_settings::Column::Order)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load section settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    let payload = serde_json::to_value(&rows).map_err(|e| {
        log::error!("Failed to serialize section settings: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_SECTIONS, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/admin/section-settings")]
async fn admin_list_sections(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let rows = section_settings::Entity::find()
        .order_by_asc(section_settings::Column::Order)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load section settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(rows))
}

#[post("/api/admin/section-settings")]
async fn create_section(ctx: AdminCtx, form: web::Json<SectionForm>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();
    let form = form.into_inner();
    form.validate().map_err(error::ErrorBadRequest)?;

    let duplicate = section_settings::Entity::find()
        .filter(section_settings::Column::SectionKey.eq(form.section_key.trim()))
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to check section key: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if duplicate.is_some() {
        return Err(error::ErrorConflict("A section with this key already exists"));
    }

    let created = form.create_model().insert(db).await.map_err(|e| {
        log::error!("Failed to create section: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_SECTIONS);
    Ok(HttpResponse::Ok().json(created))
}

#[put("/api/admin/section-settings/{id}")]
async fn update_section(
    ctx: AdminCtx,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = section_settings::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load section: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Section not found"))?;

    let mut base = serde_json::to_value(SectionForm::from_model(&existing)).map_err(|e| {
        log::error!("Failed to serialize section form: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let form: SectionForm = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed section payload: {}", e)))?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let updated = form.update_model(&existing).update(db).await.map_err(|e| {
        log::error!("Failed to update section: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_SECTIONS);
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/api/admin/section-settings/{id}")]
async fn delete_section(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let result = section_settings::Entity::delete_by_id(path.into_inner())
        .exec(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to delete section: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if result.rows_affected == 0 {
        return Err(error::ErrorNotFound("Section not found"));
    }

    cache::invalidate(CACHE_SECTIONS);
    Ok(HttpResponse::NoContent().finish())
}
