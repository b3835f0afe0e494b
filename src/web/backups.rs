//! Content backups: point-in-time snapshots of a single row, restorable
//! later.
//!
//! A snapshot stores the row's serialized form in `content_backups.data`
//! together with the type and id it came from, so restore can put it
//! back even after the original row was deleted. `expires_at` is
//! advisory; only the maintenance binary purges old backups.

use actix_web::{delete, error, get, post, web, Error, HttpResponse};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait, QueryFilter, QueryOrder,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::cache;
use crate::db::get_db_pool;
use crate::middleware::AdminCtx;
use crate::orm::{
    about_content, blog_articles, content_backups, hero_content, legal_pages, partners, projects,
    services, team_members, testimonials,
};

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(list_backups)
        .service(create_backup)
        .service(restore_backup)
        .service(delete_backup);
}

/// Serializes the named row, or None when it does not exist.
async fn snapshot_row<E>(content_id: &str) -> Result<Option<Value>, Error>
where
    E: EntityTrait,
    E::Model: Serialize,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<String>,
{
    let row = E::find_by_id(content_id.to_owned().into())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load row for backup: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    match row {
        Some(model) => Ok(Some(serde_json::to_value(model).map_err(|e| {
            log::error!("Failed to serialize row for backup: {}", e);
            error::ErrorInternalServerError("Serialization error")
        })?)),
        None => Ok(None),
    }
}

/// Writes a snapshot back: updates the row when it still exists, or
/// re-creates it under its original id when it was deleted.
async fn restore_row<A>(content_id: &str, data: Value) -> Result<Value, Error>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    <A::Entity as EntityTrait>::Model: DeserializeOwned + Serialize + IntoActiveModel<A>,
    <<A::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType: From<String>,
{
    let db = get_db_pool();
    let model: <A::Entity as EntityTrait>::Model = serde_json::from_value(data).map_err(|e| {
        log::error!("Backup data does not deserialize: {}", e);
        error::ErrorInternalServerError("Backup data does not match its content type")
    })?;

    let exists = <A::Entity as EntityTrait>::find_by_id(content_id.to_owned().into())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load restore target: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .is_some();

    let active = model.into_active_model();
    let restored = if exists {
        active.update(db).await
    } else {
        active.insert(db).await
    }
    .map_err(|e| {
        log::error!("Failed to restore backup: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    serde_json::to_value(restored).map_err(|e| {
        log::error!("Failed to serialize restored row: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })
}

async fn snapshot_for(content_type: &str, content_id: &str) -> Result<Option<Value>, Error> {
    match content_type {
        "hero-content" => snapshot_row::<hero_content::Entity>(content_id).await,
        "about-content" => snapshot_row::<about_content::Entity>(content_id).await,
        "services" => snapshot_row::<services::Entity>(content_id).await,
        "projects" => snapshot_row::<projects::Entity>(content_id).await,
        "blog-articles" => snapshot_row::<blog_articles::Entity>(content_id).await,
        "testimonials" => snapshot_row::<testimonials::Entity>(content_id).await,
        "team-members" => snapshot_row::<team_members::Entity>(content_id).await,
        "partners" => snapshot_row::<partners::Entity>(content_id).await,
        "legal-pages" => snapshot_row::<legal_pages::Entity>(content_id).await,
        other => Err(error::ErrorBadRequest(format!(
            "Unknown content type: {}",
            other
        ))),
    }
}

async fn restore_for(content_type: &str, content_id: &str, data: Value) -> Result<Value, Error> {
    match content_type {
        "hero-content" => restore_row::<hero_content::ActiveModel>(content_id, data).await,
        "about-content" => restore_row::<about_content::ActiveModel>(content_id, data).await,
        "services" => restore_row::<services::ActiveModel>(content_id, data).await,
        "projects" => restore_row::<projects::ActiveModel>(content_id, data).await,
        "blog-articles" => restore_row::<blog_articles::ActiveModel>(content_id, data).await,
        "testimonials" => restore_row::<testimonials::ActiveModel>(content_id, data).await,
        "team-members" => restore_row::<team_members::ActiveModel>(content_id, data).await,
        "partners" => restore_row::<partners::ActiveModel>(content_id, data).await,
        "legal-pages" => restore_row::<legal_pages::ActiveModel>(content_id, data).await,
        other => Err(error::ErrorBadRequest(format!(
            "Unknown content type: {}",
            other
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct BackupQuery {
    content_type: Option<String>,
    content_id: Option<String>,
}

#[get("/api/admin/backups")]
async fn list_backups(ctx: AdminCtx, query: web::Query<BackupQuery>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let mut select = content_backups::Entity::find();
    if let Some(content_type) = &query.content_type {
        select = select.filter(content_backups::Column::ContentType.eq(content_type.clone()));
    }
    if let Some(content_id) = &query.content_id {
        select = select.filter(content_backups::Column::ContentId.eq(content_id.clone()));
    }

    let backups = select
        .order_by_desc(content_backups::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load backups: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(backups))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBackupForm {
    content_type: String,
    content_id: String,
    expires_at: Option<chrono::NaiveDateTime>,
}

#[post("/api/admin/backups")]
async fn create_backup(
    ctx: AdminCtx,
    form: web::Json<CreateBackupForm>,
) -> Result<HttpResponse, Error> {
    let admin_id = ctx.require_admin()?.id.clone();
    let form = form.into_inner();

    let data = snapshot_for(&form.content_type, &form.content_id)
        .await?
        .ok_or_else(|| error::ErrorNotFound("Content row not found"))?;

    let backup = content_backups::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        content_type: Set(form.content_type),
        content_id: Set(form.content_id),
        data: Set(data),
        created_by: Set(Some(admin_id)),
        created_at: Set(Utc::now().naive_utc()),
        expires_at: Set(form.expires_at),
    }
    .insert(get_db_pool())
    .await
    .map_err(|e| {
        log::error!("Failed to store backup: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(backup))
}

#[post("/api/admin/backups/{id}/restore")]
async fn restore_backup(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let backup = content_backups::Entity::find_by_id(path.into_inner())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load backup: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Backup not found"))?;

    let restored = restore_for(&backup.content_type, &backup.content_id, backup.data).await?;

    // A restore can change any cached payload; flush everything.
    cache::clear();
    super::feed::clear_feed_cache();

    Ok(HttpResponse::Ok().json(restored))
}

#[delete("/api/admin/backups/{id}")]
async fn delete_backup(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let result = content_backups::Entity::delete_by_id(path.into_inner())
        .exec(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to delete backup: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if result.rows_affected == 0 {
        return Err(error::ErrorNotFound("Backup not found"));
    }
    Ok(HttpResponse::NoContent().finish())
}
