//! Email administration: sender settings, template overrides and the
//! delivery log.
//!
//! Everything here is admin-only; nothing email-related is exposed on
//! the public surface. Template bodies are bilingual and rendered with
//! `{{variable}}` substitution at send time (see `crate::email`).

use actix_web::{delete, error, get, post, put, web, Error, HttpResponse};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::constants::SINGLETON_ID;
use crate::db::get_db_pool;
use crate::middleware::AdminCtx;
use crate::orm::{email_logs, email_settings, email_templates};
use crate::seed_data;

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(admin_view_email_settings)
        .service(update_email_settings)
        .service(admin_list_templates)
        .service(create_template)
        .service(update_template)
        .service(delete_template)
        .service(admin_list_email_logs);
}

const EMAIL_LOG_LIMIT: u64 = 200;

#[get("/api/admin/email-settings")]
async fn admin_view_email_settings(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let settings = email_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load email settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_email_settings);
    Ok(HttpResponse::Ok().json(settings))
}

#[put("/api/admin/email-settings")]
async fn update_email_settings(
    ctx: AdminCtx,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = email_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load email settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    let exists = existing.is_some();

    let base_model = existing.unwrap_or_else(seed_data::default_email_settings);
    let mut base = serde_json::to_value(&base_model).map_err(|e| {
        log::error!("Failed to serialize email settings: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let mut merged: email_settings::Model = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed email settings: {}", e)))?;
    merged.id = SINGLETON_ID.to_owned();
    merged.updated_at = Utc::now().naive_utc();

    let row = seed_data::email_settings_row(merged);
    let saved = if exists {
        row.update(db).await
    } else {
        row.insert(db).await
    }
    .map_err(|e| {
        log::error!("Failed to store email settings: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(saved))
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
struct EmailTemplateForm {
    #[validate(length(min = 1))]
    template_key: String,
    #[validate(length(min = 1))]
    subject_nl: String,
    #[validate(length(min = 1))]
    subject_en: String,
    body_nl: String,
    body_en: String,
    is_active: bool,
}

impl Default for EmailTemplateForm {
    fn default() -> Self {
        Self {
            template_key: String::new(),
            subject_nl: String::new(),
            subject_en: String::new(),
            body_nl: String::new(),
            body_en: String::new(),
            is_active: true,
        }
    }
}

impl EmailTemplateForm {
    fn from_model(template: &email_templates::Model) -> Self {
        Self {
            template_key: template.template_key.clone(),
            subject_nl: template.subject_nl.clone(),
            subject_en: template.subject_en.clone(),
            body_nl: template.body_nl.clone(),
            body_en: template.body_en.clone(),
            is_active: template.is_active,
        }
    }

    fn create_model(self) -> email_templates::ActiveModel {
        let now = Utc::now().naive_utc();
        email_templates::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            template_key: Set(self.template_key.trim().to_owned()),
            subject_nl: Set(self.subject_nl),
            subject_en: Set(self.subject_en),
            body_nl: Set(self.body_nl),
            body_en: Set(self.body_en),
            is_active: Set(self.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    // The key survives updates; it is what the sending code looks up.
    fn update_model(self, existing: &email_templates::Model) -> email_templates::ActiveModel {
        email_templates::ActiveModel {
            id: Set(existing.id.clone()),
            subject_nl: Set(self.subject_nl),
            subject_en: Set(self.subject_en),
            body_nl: Set(self.body_nl),
            body_en: Set(self.body_en),
            is_active: Set(self.is_active),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
    }
}

#[get("/api/admin/email-templates")]
async fn admin_list_templates(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let templates = email_templates::Entity::find()
        .order_by_asc(email_templates::Column::TemplateKey)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load email templates: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(templates))
}

#[post("/api/admin/email-templates")]
async fn create_template(
    ctx: AdminCtx,
    form: web::Json<EmailTemplateForm>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();
    let form = form.into_inner();
    form.validate().map_err(error::ErrorBadRequest)?;

    let duplicate = email_templates::Entity::find()
        .filter(email_templates::Column::TemplateKey.eq(form.template_key.trim()))
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to check template key: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if duplicate.is_some() {
        return Err(error::ErrorConflict(
            "A template with this key already exists",
        ));
    }

    let created = form.create_model().insert(db).await.map_err(|e| {
        log::error!("Failed to create email template: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;
    Ok(HttpResponse::Ok().json(created))
}

#[put("/api/admin/email-templates/{id}")]
async fn update_template(
    ctx: AdminCtx,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = email_templates::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load email template: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Email template not found"))?;

    let mut base = serde_json::to_value(EmailTemplateForm::from_model(&existing)).map_err(|e| {
        log::error!("Failed to serialize template form: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let form: EmailTemplateForm = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed template payload: {}", e)))?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let updated = form.update_model(&existing).update(db).await.map_err(|e| {
        log::error!("Failed to update email template: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/api/admin/email-templates/{id}")]
async fn delete_template(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let result = email_templates::Entity::delete_by_id(path.into_inner())
        .exec(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to delete email template: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if result.rows_affected == 0 {
        return Err(error::ErrorNotFound("Email template not found"));
    }
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/admin/email-logs")]
async fn admin_list_email_logs(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let logs = email_logs::Entity::find()
        .order_by_desc(email_logs::Column::CreatedAt)
        .limit(EMAIL_LOG_LIMIT)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load email logs: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(logs))
}
