//! Legal pages: privacy policy, terms, cookie statement. Public pages are
//! addressed by slug; the slug is editable but kept unique and normalized.

use actix_web::{delete, error, get, post, put, web, Error, HttpResponse};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::content::slug::slugify;
use crate::db::get_db_pool;
use crate::middleware::AdminCtx;
use crate::orm::legal_pages;

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_legal_page)
        .service(admin_list_legal_pages)
        .service(create_legal_page)
        .service(update_legal_page)
        .service(delete_legal_page);
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
struct LegalPageForm {
    #[validate(length(min = 1))]
    slug: String,
    #[validate(length(min = 1))]
    title_nl: String,
    #[validate(length(min = 1))]
    title_en: String,
    content_nl: String,
    content_en: String,
    is_active: bool,
}

impl Default for LegalPageForm {
    fn default() -> Self {
        Self {
            slug: String::new(),
            title_nl: String::new(),
            title_en: String::new(),
            content_nl: String::new(),
            content_en: String::new(),
            is_active: true,
        }
    }
}

impl LegalPageForm {
    fn from_model(page: &legal_pages::Model) -> Self {
        Self {
            slug: page.slug.clone(),
            title_nl: page.title_nl.clone(),
            title_en: page.title_en.clone(),
            content_nl: page.content_nl.clone(),
            content_en: page.content_en.clone(),
            is_active: page.is_active,
        }
    }

    fn create_model(self) -> legal_pages::ActiveModel {
        let now = Utc::now().naive_utc();
        legal_pages::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            slug: Set(slugify(&self.slug)),
            title_nl: Set(self.title_nl.trim().to_owned()),
            title_en: Set(self.title_en.trim().to_owned()),
            content_nl: Set(self.content_nl),
            content_en: Set(self.content_en),
            is_active: Set(self.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn update_model(self, existing: &legal_pages::Model) -> legal_pages::ActiveModel {
        legal_pages::ActiveModel {
            id: Set(existing.id.clone()),
            slug: Set(slugify(&self.slug)),
            title_nl: Set(self.title_nl.trim().to_owned()),
            title_en: Set(self.title_en.trim().to_owned()),
            content_nl: Set(self.content_nl),
            content_en: Set(self.content_en),
            is_active: Set(self.is_active),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
    }
}

/// Looks for a page already claiming `slug`, ignoring `exclude_id` so a page
/// can keep its own slug across updates.
async fn slug_taken(slug: &str, exclude_id: Option<&str>) -> Result<bool, Error> {
    let found = legal_pages::Entity::find()
        .filter(legal_pages::Column::Slug.eq(slug))
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to check legal page slug: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(match (found, exclude_id) {
        (Some(page), Some(id)) => page.id != id,
        (Some(_), None) => true,
        (None, _) => false,
    })
}

#[get("/api/legal/{slug}")]
async fn view_legal_page(path: web::Path<String>) -> Result<HttpResponse, Error> {
    let page = legal_pages::Entity::find()
        .filter(legal_pages::Column::Slug.eq(path.into_inner()))
        .filter(legal_pages::Column::IsActive.eq(true))
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load legal page: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Page not found"))?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/api/admin/legal-pages")]
async fn admin_list_legal_pages(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let pages = legal_pages::Entity::find()
        .order_by_asc(legal_pages::Column::Slug)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load legal pages: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(pages))
}

#[post("/api/admin/legal-pages")]
async fn create_legal_page(
    ctx: AdminCtx,
    form: web::Json<LegalPageForm>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let form = form.into_inner();
    form.validate().map_err(error::ErrorBadRequest)?;

    if slug_taken(&slugify(&form.slug), None).await? {
        return Err(error::ErrorConflict("A page with this slug already exists"));
    }

    let created = form.create_model().insert(get_db_pool()).await.map_err(|e| {
        log::error!("Failed to create legal page: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;
    Ok(HttpResponse::Ok().json(created))
}

#[put("/api/admin/legal-pages/{id}")]
async fn update_legal_page(
    ctx: AdminCtx,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = legal_pages::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load legal page: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Page not found"))?;

    let mut base = serde_json::to_value(LegalPageForm::from_model(&existing)).map_err(|e| {
        log::error!("Failed to serialize legal page form: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let form: LegalPageForm = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed legal page payload: {}", e)))?;
    form.validate().map_err(error::ErrorBadRequest)?;

    if slug_taken(&slugify(&form.slug), Some(&existing.id)).await? {
        return Err(error::ErrorConflict("A page with this slug already exists"));
    }

    let updated = form.update_model(&existing).update(db).await.map_err(|e| {
        log::error!("Failed to update legal page: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/api/admin/legal-pages/{id}")]
async fn delete_legal_page(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let result = legal_pages::Entity::delete_by_id(path.into_inner())
        .exec(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to delete legal page: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if result.rows_affected == 0 {
        return Err(error::ErrorNotFound("Page not found"));
    }
    Ok(HttpResponse::NoContent().finish())
}
