//! Media library: image uploads into the configured storage backend,
//! tracked in the `media_files` table.

use actix_web::http::header;
use actix_web::{delete, error, get, post, web, Error, HttpRequest, HttpResponse};
use chrono::Utc;
use futures::{StreamExt, TryStreamExt};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::constants::MAX_UPLOAD_SIZE;
use crate::db::get_db_pool;
use crate::middleware::AdminCtx;
use crate::orm::media_files;
use crate::storage::{self, StorageError};

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(upload_media)
        .service(list_media)
        .service(delete_media)
        .service(serve_upload);
}

/// A fully buffered image part from a multipart request.
pub(crate) struct UploadedFile {
    pub data: Vec<u8>,
    pub original_name: String,
    pub content_type: String,
}

/// Buffers one multipart field, enforcing the image-only and size rules.
/// Fields without a filename are not file parts and yield None.
pub(crate) async fn collect_image_field(
    field: &mut actix_multipart::Field,
) -> Result<Option<UploadedFile>, Error> {
    let original_name = match field.content_disposition().get_filename() {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => return Ok(None),
    };

    let content_type = match field.content_type() {
        Some(mime) if mime.type_() == mime::IMAGE => mime.to_string(),
        _ => return Err(error::ErrorBadRequest("Only image uploads are accepted")),
    };

    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|_| error::ErrorBadRequest("Read error"))?;
        if data.len() + chunk.len() > MAX_UPLOAD_SIZE {
            return Err(error::ErrorBadRequest("File exceeds the 10 MB upload limit"));
        }
        data.extend_from_slice(&chunk);
    }
    if data.is_empty() {
        return Err(error::ErrorBadRequest("Uploaded file is empty"));
    }

    Ok(Some(UploadedFile {
        data,
        original_name,
        content_type,
    }))
}

#[post("/api/admin/media/upload")]
async fn upload_media(
    ctx: AdminCtx,
    mut multipart: actix_multipart::Multipart,
) -> Result<HttpResponse, Error> {
    let admin_id = ctx.require_admin()?.id.clone();

    let mut upload: Option<UploadedFile> = None;
    while let Ok(Some(mut field)) = multipart.try_next().await {
        if let Some(file) = collect_image_field(&mut field).await? {
            upload = Some(file);
            break;
        }
    }
    let upload = upload.ok_or_else(|| error::ErrorBadRequest("No file provided"))?;

    let filename = storage::content_name(&upload.data, &upload.original_name);
    let backend = storage::get_backend();
    let size = upload.data.len() as i64;
    backend
        .put_object(upload.data, &filename)
        .await
        .map_err(|e| {
            log::error!("Failed to store upload {}: {}", filename, e);
            error::ErrorBadGateway("Storage error")
        })?;

    let stored = media_files::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        filename: Set(filename.clone()),
        original_name: Set(upload.original_name),
        url: Set(backend.public_url(&filename)),
        mime_type: Set(upload.content_type),
        size: Set(size),
        uploaded_by: Set(Some(admin_id)),
        created_at: Set(Utc::now().naive_utc()),
    }
    .insert(get_db_pool())
    .await
    .map_err(|e| {
        log::error!("Failed to record upload: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(stored))
}

#[get("/api/admin/media")]
async fn list_media(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let files = media_files::Entity::find()
        .order_by_desc(media_files::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load media files: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(files))
}

#[delete("/api/admin/media/{id}")]
async fn delete_media(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let file = media_files::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load media file: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Media file not found"))?;

    // Drop the record first; a stale object in storage is harmless, a
    // record pointing at deleted bytes is not.
    let filename = file.filename.clone();
    media_files::Entity::delete_by_id(file.id)
        .exec(db)
        .await
        .map_err(|e| {
            log::error!("Failed to delete media record: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    if let Err(e) = storage::get_backend().delete_object(&filename).await {
        log::warn!("Failed to delete stored object {}: {}", filename, e);
    }

    Ok(HttpResponse::NoContent().finish())
}

/// Streams a stored upload back out through the storage backend, so the
/// URL space stays the same whichever backend holds the bytes. Honors
/// HTTP Range requests.
#[get("/uploads/{filename}")]
async fn serve_upload(req: HttpRequest, path: web::Path<String>) -> Result<HttpResponse, Error> {
    let filename = path.into_inner();
    // Names are single content-addressed path segments.
    if filename.contains('/') || filename.contains("..") {
        return Err(error::ErrorNotFound("File not found"));
    }

    let range = req
        .headers()
        .get(header::RANGE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_owned());

    let object = storage::get_backend()
        .get_object(&filename, range)
        .await
        .map_err(|e| match e {
            StorageError::NotFound(_) => error::ErrorNotFound("File not found"),
            StorageError::InvalidRange(_) => {
                error::ErrorRangeNotSatisfiable("Range not satisfiable")
            }
            other => {
                log::error!("Failed to read upload {}: {}", filename, other);
                error::ErrorInternalServerError("Storage error")
            }
        })?;

    let mut builder = if object.content_range.is_some() {
        HttpResponse::PartialContent()
    } else {
        HttpResponse::Ok()
    };
    if let Some(content_type) = &object.content_type {
        builder.insert_header((header::CONTENT_TYPE, content_type.clone()));
    }
    if let Some(e_tag) = &object.e_tag {
        builder.insert_header((header::ETAG, e_tag.clone()));
    }
    if let Some(last_modified) = &object.last_modified {
        builder.insert_header((header::LAST_MODIFIED, last_modified.clone()));
    }
    if let Some(content_range) = &object.content_range {
        builder.insert_header((header::CONTENT_RANGE, content_range.clone()));
    }
    if let Some(accept_ranges) = &object.accept_ranges {
        builder.insert_header((header::ACCEPT_RANGES, accept_ranges.clone()));
    }
    // Content-addressed names never change their bytes.
    builder.insert_header((header::CACHE_CONTROL, "public, max-age=31536000, immutable"));
    if let Some(length) = object.content_length {
        builder.no_chunking(length as u64);
    }
    Ok(builder.streaming(object.body))
}
