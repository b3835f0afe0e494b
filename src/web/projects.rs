//! Project portfolio and gallery management.
//!
//! Gallery uploads land in the storage backend under content-addressed
//! names; the project row only keeps the public urls. Stored objects are
//! left in place when a gallery record is removed, since content
//! addressing means other galleries may reference the same bytes.

use actix_web::{delete, error, get, post, put, web, Error, HttpResponse};
use chrono::Utc;
use futures::TryStreamExt;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::cache;
use crate::content::lists;
use crate::db::get_db_pool;
use crate::editor::project::{self, GalleryImage};
use crate::editor::ProjectForm;
use crate::middleware::AdminCtx;
use crate::orm::projects;
use crate::storage;

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_projects)
        .service(admin_list_projects)
        .service(create_project)
        .service(update_project)
        .service(delete_project)
        .service(upload_project_images)
        .service(delete_project_image)
        .service(set_project_featured_image);
}

const CACHE_PROJECTS: &str = "projects";

#[get("/api/projects")]
async fn view_projects() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_PROJECTS) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let rows = projects::Entity::find()
        .filter(projects::Column::IsActive.eq(true))
        .order_by_asc(projects::Column::Order)
        .order_by_asc(projects::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load projects: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    let payload = serde_json::to_value(&rows).map_err(|e| {
        log::error!("Failed to serialize projects: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_PROJECTS, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/admin/projects")]
async fn admin_list_projects(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let rows = projects::Entity::find()
        .order_by_asc(projects::Column::Order)
        .order_by_asc(projects::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load projects: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(rows))
}

#[post("/api/admin/projects")]
async fn create_project(ctx: AdminCtx, form: web::Json<ProjectForm>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let form = form.into_inner();
    form.validate().map_err(error::ErrorBadRequest)?;

    let created = form.create_model().insert(get_db_pool()).await.map_err(|e| {
        log::error!("Failed to create project: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_PROJECTS);
    Ok(HttpResponse::Ok().json(created))
}

#[put("/api/admin/projects/{id}")]
async fn update_project(
    ctx: AdminCtx,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = projects::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load project: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Project not found"))?;

    let mut base = serde_json::to_value(ProjectForm::from_model(&existing)).map_err(|e| {
        log::error!("Failed to serialize project form: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let form: ProjectForm = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed project payload: {}", e)))?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let updated = form.update_model(&existing).update(db).await.map_err(|e| {
        log::error!("Failed to update project: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_PROJECTS);
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/api/admin/projects/{id}")]
async fn delete_project(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let result = projects::Entity::delete_by_id(path.into_inner())
        .exec(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to delete project: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if result.rows_affected == 0 {
        return Err(error::ErrorNotFound("Project not found"));
    }

    cache::invalidate(CACHE_PROJECTS);
    Ok(HttpResponse::NoContent().finish())
}

/// Persists a changed gallery (and featured slot) on the project row.
async fn store_gallery(
    project: &projects::Model,
    gallery: &[GalleryImage],
    featured: Option<String>,
) -> Result<projects::Model, Error> {
    projects::ActiveModel {
        id: Set(project.id.clone()),
        gallery: Set(Some(lists::to_json(gallery))),
        featured_image: Set(featured),
        updated_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .update(get_db_pool())
    .await
    .map_err(|e| {
        log::error!("Failed to store project gallery: {}", e);
        error::ErrorInternalServerError("Database error")
    })
}

#[post("/api/admin/projects/{id}/images")]
async fn upload_project_images(
    ctx: AdminCtx,
    path: web::Path<String>,
    mut multipart: actix_multipart::Multipart,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = projects::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load project: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Project not found"))?;

    let mut uploads = Vec::new();
    while let Ok(Some(mut field)) = multipart.try_next().await {
        if let Some(file) = super::media::collect_image_field(&mut field).await? {
            uploads.push(file);
        }
    }
    if uploads.is_empty() {
        return Err(error::ErrorBadRequest("No image files provided"));
    }

    let backend = storage::get_backend();
    let mut gallery: Vec<GalleryImage> = lists::records(existing.gallery.as_ref());
    for file in uploads {
        let filename = storage::content_name(&file.data, &file.original_name);
        let size = file.data.len() as i64;
        backend.put_object(file.data, &filename).await.map_err(|e| {
            log::error!("Failed to store gallery upload {}: {}", filename, e);
            error::ErrorBadGateway("Storage error")
        })?;
        project::append_image(
            &mut gallery,
            GalleryImage::new(
                backend.public_url(&filename),
                Some(file.original_name),
                Some(size),
            ),
        );
    }

    let featured = existing.featured_image.clone();
    let updated = store_gallery(&existing, &gallery, featured).await?;

    cache::invalidate(CACHE_PROJECTS);
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/api/admin/projects/{id}/images/{image_id}")]
async fn delete_project_image(
    ctx: AdminCtx,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let (project_id, image_id) = path.into_inner();
    let db = get_db_pool();

    let existing = projects::Entity::find_by_id(project_id)
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load project: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Project not found"))?;

    let mut gallery: Vec<GalleryImage> = lists::records(existing.gallery.as_ref());
    let mut featured = existing.featured_image.clone();
    if project::remove_image(&mut gallery, &image_id, &mut featured).is_none() {
        return Err(error::ErrorNotFound("Gallery image not found"));
    }

    let updated = store_gallery(&existing, &gallery, featured).await?;

    cache::invalidate(CACHE_PROJECTS);
    Ok(HttpResponse::Ok().json(updated))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeaturedImageBody {
    image_url: String,
}

#[put("/api/admin/projects/{id}/featured-image")]
async fn set_project_featured_image(
    ctx: AdminCtx,
    path: web::Path<String>,
    body: web::Json<FeaturedImageBody>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = projects::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load project: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Project not found"))?;

    let gallery: Vec<GalleryImage> = lists::records(existing.gallery.as_ref());
    let mut featured = existing.featured_image.clone();
    if !project::set_featured(&gallery, &body.image_url, &mut featured) {
        return Err(error::ErrorBadRequest(
            "Image is not part of this project's gallery",
        ));
    }

    let updated = store_gallery(&existing, &gallery, featured).await?;

    cache::invalidate(CACHE_PROJECTS);
    Ok(HttpResponse::Ok().json(updated))
}
