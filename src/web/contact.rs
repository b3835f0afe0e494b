//! Contact surface: public inquiry intake validated against the
//! configured form fields, the field configuration itself (including
//! initialization and reordering), and inquiry management.
//!
//! The public submission is a flat object keyed by `field_key`, so the
//! form the admin configures is the form the validator enforces. Email
//! notifications are best-effort: a delivery failure is logged and the
//! inquiry still succeeds.

use actix_web::{delete, error, get, post, put, web, Error, HttpRequest, HttpResponse};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::cache;
use crate::db::get_db_pool;
use crate::editor::contact_form::plan_move;
use crate::editor::{ContactFieldForm, MoveDirection};
use crate::email;
use crate::ip::extract_client_ip;
use crate::middleware::AdminCtx;
use crate::orm::contact_inquiries::{self, InquiryStatus};
use crate::orm::contact_form_settings;
use crate::seed_data;

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_contact_fields)
        .service(submit_inquiry)
        .service(admin_list_contact_fields)
        .service(create_contact_field)
        .service(initialize_contact_fields)
        .service(move_contact_field)
        .service(update_contact_field)
        .service(delete_contact_field)
        .service(admin_list_inquiries)
        .service(update_inquiry_status)
        .service(delete_inquiry);
}

const CACHE_CONTACT_FIELDS: &str = "contact-form-settings";

#[get("/api/contact-form-settings")]
async fn view_contact_fields() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_CONTACT_FIELDS) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let fields = contact_form_settings::Entity::find()
        .filter(contact_form_settings::Column::IsVisible.eq(true))
        .order_by_asc(contact_form_settings::Column::Order)
        .order_by_asc(contact_form_settings::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load contact form fields: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    let payload = serde_json::to_value(&fields).map_err(|e| {
        log::error!("Failed to serialize contact form fields: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_CONTACT_FIELDS, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

/// Reads the submitted value for one configured field, trimmed; empty
/// strings count as absent.
fn submitted_value(payload: &Value, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

#[post("/api/contact")]
async fn submit_inquiry(req: HttpRequest, payload: web::Json<Value>) -> Result<HttpResponse, Error> {
    let payload = payload.into_inner();
    let db = get_db_pool();

    let fields = contact_form_settings::Entity::find()
        .filter(contact_form_settings::Column::IsVisible.eq(true))
        .all(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load contact form fields: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    for field in fields.iter().filter(|f| f.is_required) {
        if submitted_value(&payload, &field.field_key).is_none() {
            return Err(error::ErrorBadRequest(format!(
                "Field '{}' is required",
                field.field_key
            )));
        }
    }

    // The columns backing an inquiry must be present whatever the form
    // configuration says; a form without them cannot be stored.
    let first_name = submitted_value(&payload, "first_name")
        .ok_or_else(|| error::ErrorBadRequest("Field 'first_name' is required"))?;
    let last_name = submitted_value(&payload, "last_name")
        .ok_or_else(|| error::ErrorBadRequest("Field 'last_name' is required"))?;
    let email_address = submitted_value(&payload, "email")
        .ok_or_else(|| error::ErrorBadRequest("Field 'email' is required"))?
        .to_lowercase();
    let message = submitted_value(&payload, "message")
        .ok_or_else(|| error::ErrorBadRequest("Field 'message' is required"))?;
    if !validator::validate_email(&email_address) {
        return Err(error::ErrorBadRequest("Invalid email address"));
    }

    let inquiry = contact_inquiries::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        first_name: Set(first_name),
        last_name: Set(last_name),
        email: Set(email_address),
        phone: Set(submitted_value(&payload, "phone")),
        company: Set(submitted_value(&payload, "company")),
        project_type: Set(submitted_value(&payload, "project_type")),
        message: Set(message),
        status: Set(InquiryStatus::New),
        ip_address: Set(extract_client_ip(&req)),
        created_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await
    .map_err(|e| {
        log::error!("Failed to store contact inquiry: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    // Best-effort notifications; the inquiry is already stored.
    let language = match payload.get("language").and_then(Value::as_str) {
        Some("en") => "en",
        _ => "nl",
    };
    let settings = email::effective_settings(db).await;
    if settings.send_visitor_confirmation {
        if let Err(e) = email::templates::send_contact_confirmation(db, &inquiry, language).await {
            log::warn!("Failed to send contact confirmation: {}", e);
        }
    }
    if settings.send_admin_notification {
        if let Err(e) =
            email::templates::send_contact_notification(db, &inquiry, &settings.notification_address)
                .await
        {
            log::warn!("Failed to send contact notification: {}", e);
        }
    }

    Ok(HttpResponse::Ok().json(inquiry))
}

async fn ordered_fields() -> Result<Vec<contact_form_settings::Model>, Error> {
    contact_form_settings::Entity::find()
        .order_by_asc(contact_form_settings::Column::Order)
        .order_by_asc(contact_form_settings::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load contact form fields: {}", e);
            error::ErrorInternalServerError("Database error")
        })
}

#[get("/api/admin/contact-form-settings")]
async fn admin_list_contact_fields(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let fields = ordered_fields().await?;
    Ok(HttpResponse::Ok().json(fields))
}

#[post("/api/admin/contact-form-settings")]
async fn create_contact_field(
    ctx: AdminCtx,
    form: web::Json<ContactFieldForm>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();
    let form = form.into_inner();
    form.validate().map_err(error::ErrorBadRequest)?;

    let duplicate = contact_form_settings::Entity::find()
        .filter(contact_form_settings::Column::FieldKey.eq(form.field_key.trim()))
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to check field key: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if duplicate.is_some() {
        return Err(error::ErrorConflict("A field with this key already exists"));
    }

    let created = form.create_model().insert(db).await.map_err(|e| {
        log::error!("Failed to create contact form field: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_CONTACT_FIELDS);
    Ok(HttpResponse::Ok().json(created))
}

#[post("/api/admin/contact-form-settings/initialize")]
async fn initialize_contact_fields(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = contact_form_settings::Entity::find()
        .count(db)
        .await
        .map_err(|e| {
            log::error!("Failed to count contact form fields: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if existing > 0 {
        return Err(error::ErrorConflict("Contact form fields already exist"));
    }

    // All defaults land or none do.
    let txn = db.begin().await.map_err(|e| {
        log::error!("Failed to open transaction: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;
    contact_form_settings::Entity::insert_many(seed_data::default_contact_fields())
        .exec(&txn)
        .await
        .map_err(|e| {
            log::error!("Failed to insert default contact form fields: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    txn.commit().await.map_err(|e| {
        log::error!("Failed to commit default contact form fields: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_CONTACT_FIELDS);
    let fields = ordered_fields().await?;
    Ok(HttpResponse::Ok().json(fields))
}

#[derive(Debug, Deserialize)]
struct MoveBody {
    direction: MoveDirection,
}

#[post("/api/admin/contact-form-settings/{id}/move")]
async fn move_contact_field(
    ctx: AdminCtx,
    path: web::Path<String>,
    body: web::Json<MoveBody>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let field_id = path.into_inner();
    let db = get_db_pool();

    let fields = ordered_fields().await?;
    if !fields.iter().any(|field| field.id == field_id) {
        return Err(error::ErrorNotFound("Contact form field not found"));
    }

    match plan_move(&fields, &field_id, body.direction) {
        Some(swap) => {
            let now = Utc::now().naive_utc();
            // Both order writes land together or not at all.
            let txn = db.begin().await.map_err(|e| {
                log::error!("Failed to open transaction: {}", e);
                error::ErrorInternalServerError("Database error")
            })?;
            contact_form_settings::ActiveModel {
                id: Set(swap.moving_id),
                order: Set(swap.moving_order),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(&txn)
            .await
            .map_err(|e| {
                log::error!("Failed to reorder contact form field: {}", e);
                error::ErrorInternalServerError("Database error")
            })?;
            contact_form_settings::ActiveModel {
                id: Set(swap.adjacent_id),
                order: Set(swap.adjacent_order),
                updated_at: Set(now),
                ..Default::default()
            }
            .update(&txn)
            .await
            .map_err(|e| {
                log::error!("Failed to reorder contact form field: {}", e);
                error::ErrorInternalServerError("Database error")
            })?;
            txn.commit().await.map_err(|e| {
                log::error!("Failed to commit field reorder: {}", e);
                error::ErrorInternalServerError("Database error")
            })?;

            cache::invalidate(CACHE_CONTACT_FIELDS);
            let fields = ordered_fields().await?;
            Ok(HttpResponse::Ok().json(fields))
        }
        // Already at the edge: nothing moves, nothing fails.
        None => Ok(HttpResponse::Ok().json(fields)),
    }
}

#[put("/api/admin/contact-form-settings/{id}")]
async fn update_contact_field(
    ctx: AdminCtx,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = contact_form_settings::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load contact form field: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Contact form field not found"))?;

    let mut base = serde_json::to_value(ContactFieldForm::from_model(&existing)).map_err(|e| {
        log::error!("Failed to serialize contact field form: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let form: ContactFieldForm = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed contact field payload: {}", e)))?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let updated = form.update_model(&existing).update(db).await.map_err(|e| {
        log::error!("Failed to update contact form field: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_CONTACT_FIELDS);
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/api/admin/contact-form-settings/{id}")]
async fn delete_contact_field(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let result = contact_form_settings::Entity::delete_by_id(path.into_inner())
        .exec(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to delete contact form field: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if result.rows_affected == 0 {
        return Err(error::ErrorNotFound("Contact form field not found"));
    }

    cache::invalidate(CACHE_CONTACT_FIELDS);
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/admin/contact-inquiries")]
async fn admin_list_inquiries(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let inquiries = contact_inquiries::Entity::find()
        .order_by_desc(contact_inquiries::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load contact inquiries: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(inquiries))
}

#[derive(Debug, Deserialize)]
struct InquiryStatusBody {
    status: InquiryStatus,
}

#[put("/api/admin/contact-inquiries/{id}")]
async fn update_inquiry_status(
    ctx: AdminCtx,
    path: web::Path<String>,
    body: web::Json<InquiryStatusBody>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let inquiry = contact_inquiries::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load contact inquiry: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Inquiry not found"))?;

    let mut active = inquiry.into_active_model();
    active.status = Set(body.into_inner().status);
    let updated = active.update(db).await.map_err(|e| {
        log::error!("Failed to update inquiry status: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/api/admin/contact-inquiries/{id}")]
async fn delete_inquiry(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let result = contact_inquiries::Entity::delete_by_id(path.into_inner())
        .exec(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to delete contact inquiry: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if result.rows_affected == 0 {
        return Err(error::ErrorNotFound("Inquiry not found"));
    }
    Ok(HttpResponse::NoContent().finish())
}
