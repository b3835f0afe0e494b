//! Company identity: legal details, contact information, the footer and
//! the social media links.

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
use crate::orm::{company_details, contact_info, footer_settings, social_media_links};
use crate::seed_data;

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_company_details)
        .service(view_contact_info)
        .service(view_footer_settings)
        .service(view_social_links)
        .service(admin_view_company_details)
        .service(update_company_details)
        .service(admin_view_contact_info)
        .service(update_contact_info)
        .service(admin_view_footer_settings)
        .service(update_footer_settings)
        .service(admin_list_social_links)
        .service(create_social_link)
        .service(update_social_link)
        .service(delete_social_link);
}

const CACHE_COMPANY_DETAILS: &str = "company-details";
const CACHE_CONTACT_INFO: &str = "contact-info";
const CACHE_FOOTER: &str = "footer-settings";
const CACHE_SOCIAL_LINKS: &str = "social-media-links";

#[get("/api/company-details")]
async fn view_company_details() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_COMPANY_DETAILS) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let details = company_details::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load company details: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_company_details);

    let payload = serde_json::to_value(&details).map_err(|e| {
        log::error!("Failed to serialize company details: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_COMPANY_DETAILS, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/contact-info")]
async fn view_contact_info() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_CONTACT_INFO) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let info = contact_info::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load contact info: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_contact_info);

    let payload = serde_json::to_value(&info).map_err(|e| {
        log::error!("Failed to serialize contact info: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_CONTACT_INFO, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/footer-settings")]
async fn view_footer_settings() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_FOOTER) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let footer = footer_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load footer settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_footer_settings);

    let payload = serde_json::to_value(&footer).map_err(|e| {
        log::error!("Failed to serialize footer settings: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_FOOTER, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/social-media-links")]
async fn view_social_links() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_SOCIAL_LINKS) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let links = social_media_links::Entity::find()
        .filter(social_media_links::Column::IsActive.eq(true))
        .order_by_asc(social_media_links::Column::Order)
        .order_by_asc(social_media_links::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load social media links: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    let payload = serde_json::to_value(&links).map_err(|e| {
        log::error!("Failed to serialize social media links: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_SOCIAL_LINKS, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/admin/company-details")]
async fn admin_view_company_details(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let details = company_details::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load company details: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_company_details);
    Ok(HttpResponse::Ok().json(details))
}

#[put("/api/admin/company-details")]
async fn update_company_details(
    ctx: AdminCtx,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = company_details::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load company details: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    let exists = existing.is_some();

    let base_model = existing.unwrap_or_else(seed_data::default_company_details);
    let mut base = serde_json::to_value(&base_model).map_err(|e| {
        log::error!("Failed to serialize company details: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let mut merged: company_details::Model = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed company details: {}", e)))?;
    merged.id = SINGLETON_ID.to_owned();
    merged.updated_at = Utc::now().naive_utc();

    let row = seed_data::company_details_row(merged);
    let saved = if exists {
        row.update(db).await
    } else {
        row.insert(db).await
    }
    .map_err(|e| {
        log::error!("Failed to store company details: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_COMPANY_DETAILS);
    Ok(HttpResponse::Ok().json(saved))
}

#[get("/api/admin/contact-info")]
async fn admin_view_contact_info(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let info = contact_info::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load contact info: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_contact_info);
    Ok(HttpResponse::Ok().json(info))
}

#[put("/api/admin/contact-info")]
async fn update_contact_info(
    ctx: AdminCtx,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = contact_info::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load contact info: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    let exists = existing.is_some();

    let base_model = existing.unwrap_or_else(seed_data::default_contact_info);
    let mut base = serde_json::to_value(&base_model).map_err(|e| {
        log::error!("Failed to serialize contact info: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let mut merged: contact_info::Model = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed contact info: {}", e)))?;
    merged.id = SINGLETON_ID.to_owned();
    merged.updated_at = Utc::now().naive_utc();

    let row = seed_data::contact_info_row(merged);
    let saved = if exists {
        row.update(db).await
    } else {
        row.insert(db).await
    }
    .map_err(|e| {
        log::error!("Failed to store contact info: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_CONTACT_INFO);
    Ok(HttpResponse::Ok().json(saved))
}

#[get("/api/admin/footer-settings")]
async fn admin_view_footer_settings(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let footer = footer_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load footer settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_footer_settings);
    Ok(HttpResponse::Ok().json(footer))
}

#[put("/api/admin/footer-settings")]
async fn update_footer_settings(
    ctx: AdminCtx,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = footer_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load footer settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    let exists = existing.is_some();

    let base_model = existing.unwrap_or_else(seed_data::default_footer_settings);
    let mut base = serde_json::to_value(&base_model).map_err(|e| {
        log::error!("Failed to serialize footer settings: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let mut merged: footer_settings::Model = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed footer settings: {}", e)))?;
    merged.id = SINGLETON_ID.to_owned();
    merged.updated_at = Utc::now().naive_utc();

    let row = seed_data::footer_settings_row(merged);
    let saved = if exists {
        row.update(db).await
    } else {
        row.insert(db).await
    }
    .map_err(|e| {
        log::error!("Failed to store footer settings: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_FOOTER);
    Ok(HttpResponse::Ok().json(saved))
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
struct SocialLinkForm {
    #[validate(length(min = 1))]
    platform: String,
    #[validate(url)]
    url: String,
    icon: Option<String>,
    order: i32,
    is_active: bool,
}

impl Default for SocialLinkForm {
    fn default() -> Self {
        Self {
            platform: String::new(),
            url: String::new(),
            icon: None,
            order: 0,
            is_active: true,
        }
    }
}

impl SocialLinkForm {
    fn from_model(link: &social_media_links::Model) -> Self {
        Self {
            platform: link.platform.clone(),
            url: link.url.clone(),
            icon: link.icon.clone(),
            order: link.order,
            is_active: link.is_active,
        }
    }

    fn create_model(self) -> social_media_links::ActiveModel {
        let now = Utc::now().naive_utc();
        social_media_links::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            platform: Set(self.platform.trim().to_owned()),
            url: Set(self.url.trim().to_owned()),
            icon: Set(self.icon),
            order: Set(self.order),
            is_active: Set(self.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn update_model(self, existing: &social_media_links::Model) -> social_media_links::ActiveModel {
        social_media_links::ActiveModel {
            id: Set(existing.id.clone()),
            platform: Set(self.platform.trim().to_owned()),
            url: Set(self.url.trim().to_owned()),
            icon: Set(self.icon),
            order: Set(self.order),
            is_active: Set(self.is_active),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
    }
}

#[get("/api/admin/social-media-links")]
async fn admin_list_social_links(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let links = social_media_links::Entity::find()
        .order_by_asc(social_media_links::Column::Order)
        .order_by_asc(social_media_links::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load social media links: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(links))
}

#[post("/api/admin/social-media-links")]
async fn create_social_link(
    ctx: AdminCtx,
    form: web::Json<SocialLinkForm>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let form = form.into_inner();
    form.validate().map_err(error::ErrorBadRequest)?;

    let created = form.create_model().insert(get_db_pool()).await.map_err(|e| {
        log::error!("Failed to create social media link: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_SOCIAL_LINKS);
    Ok(HttpResponse::Ok().json(created))
}

#[put("/api/admin/social-media-links/{id}")]
async fn update_social_link(
    ctx: AdminCtx,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = social_media_links::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load social media link: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Social media link not found"))?;

    let mut base = serde_json::to_value(SocialLinkForm::from_model(&existing)).map_err(|e| {
        log::error!("Failed to serialize social link form: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let form: SocialLinkForm = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed social link payload: {}", e)))?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let updated = form.update_model(&existing).update(db).await.map_err(|e| {
        log::error!("Failed to update social media link: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_SOCIAL_LINKS);
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/api/admin/social-media-links/{id}")]
async fn delete_social_link(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let result = social_media_links::Entity::delete_by_id(path.into_inner())
        .exec(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to delete social media link: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if result.rows_affected == 0 {
        return Err(error::ErrorNotFound("Social media link not found"));
    }

    cache::invalidate(CACHE_SOCIAL_LINKS);
    Ok(HttpResponse::NoContent().finish())
}
