//! Blog: public reading surface, comment intake and moderation, article
//! management and the blog section settings.
//!
//! Slugs resolve in either language on the public route, so a slug
//! conflict check spans both slug columns. Article mutations clear the
//! syndication feed cache along with the content cache.

use actix_web::{delete, error, get, post, put, web, Error, HttpResponse};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::cache;
use crate::constants::SINGLETON_ID;
use crate::content::lists;
use crate::db::get_db_pool;
use crate::editor::BlogArticleForm;
use crate::middleware::AdminCtx;
use crate::orm::{blog_articles, blog_comments, blog_settings};
use crate::seed_data;

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_articles)
        .service(view_article_comments)
        .service(submit_comment)
        .service(view_article)
        .service(view_blog_settings)
        .service(admin_list_articles)
        .service(create_article)
        .service(update_article)
        .service(delete_article)
        .service(admin_list_comments)
        .service(moderate_comment)
        .service(delete_comment)
        .service(admin_view_blog_settings)
        .service(update_blog_settings);
}

const CACHE_BLOG: &str = "blog";
const CACHE_BLOG_SETTINGS: &str = "blog-settings";

fn invalidate_blog_caches() {
    cache::invalidate(CACHE_BLOG);
    super::feed::clear_feed_cache();
}

#[derive(Debug, Default, Deserialize)]
struct BlogQuery {
    tag: Option<String>,
    featured: Option<bool>,
}

#[get("/api/blog")]
async fn view_articles(query: web::Query<BlogQuery>) -> Result<HttpResponse, Error> {
    let unfiltered = query.tag.is_none() && query.featured.is_none();
    if unfiltered {
        if let Some(cached) = cache::get(CACHE_BLOG) {
            return Ok(HttpResponse::Ok().json(cached));
        }
    }

    let mut select = blog_articles::Entity::find()
        .filter(blog_articles::Column::IsPublished.eq(true));
    if let Some(featured) = query.featured {
        select = select.filter(blog_articles::Column::IsFeatured.eq(featured));
    }
    let mut articles = select
        .order_by_desc(blog_articles::Column::PublishedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load blog articles: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    // Tags live in Json columns; the list is small enough to sieve here.
    if let Some(tag) = query.tag.as_deref() {
        articles.retain(|article| {
            lists::strings(article.tags_nl.as_ref())
                .iter()
                .chain(lists::strings(article.tags_en.as_ref()).iter())
                .any(|t| t == tag)
        });
    }

    let payload = serde_json::to_value(&articles).map_err(|e| {
        log::error!("Failed to serialize blog articles: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    if unfiltered {
        cache::insert(CACHE_BLOG, payload.clone());
    }
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/blog/{slug}")]
async fn view_article(path: web::Path<String>) -> Result<HttpResponse, Error> {
    let slug = path.into_inner();
    let db = get_db_pool();

    let article = blog_articles::Entity::find()
        .filter(
            Condition::any()
                .add(blog_articles::Column::SlugNl.eq(slug.clone()))
                .add(blog_articles::Column::SlugEn.eq(slug)),
        )
        .filter(blog_articles::Column::IsPublished.eq(true))
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load blog article: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Article not found"))?;

    // The read path owns the view counter; updated_at stays untouched.
    let bumped = blog_articles::ActiveModel {
        id: Set(article.id.clone()),
        view_count: Set(article.view_count + 1),
        ..Default::default()
    }
    .update(db)
    .await
    .map_err(|e| {
        log::error!("Failed to bump view count: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(bumped))
}

#[get("/api/blog/{id}/comments")]
async fn view_article_comments(path: web::Path<String>) -> Result<HttpResponse, Error> {
    let comments = blog_comments::Entity::find()
        .filter(blog_comments::Column::ArticleId.eq(path.into_inner()))
        .filter(blog_comments::Column::IsApproved.eq(true))
        .order_by_desc(blog_comments::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load comments: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(comments))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct CommentForm {
    #[validate(length(min = 1))]
    author_name: String,
    #[validate(email)]
    author_email: String,
    #[validate(length(min = 1))]
    content: String,
}

#[post("/api/blog/{id}/comments")]
async fn submit_comment(
    path: web::Path<String>,
    form: web::Json<CommentForm>,
) -> Result<HttpResponse, Error> {
    let form = form.into_inner();
    form.validate().map_err(error::ErrorBadRequest)?;
    let db = get_db_pool();

    let article = blog_articles::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load blog article: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .filter(|article| article.is_published)
        .ok_or_else(|| error::ErrorNotFound("Article not found"))?;

    // Comments arrive unapproved and stay invisible until moderated.
    let created = blog_comments::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        article_id: Set(article.id),
        author_name: Set(form.author_name.trim().to_owned()),
        author_email: Set(form.author_email.trim().to_lowercase()),
        content: Set(form.content.trim().to_owned()),
        is_approved: Set(false),
        created_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await
    .map_err(|e| {
        log::error!("Failed to store comment: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(created))
}

#[get("/api/blog-settings")]
async fn view_blog_settings() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_BLOG_SETTINGS) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let settings = blog_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load blog settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_blog_settings);

    let payload = serde_json::to_value(&settings).map_err(|e| {
        log::error!("Failed to serialize blog settings: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_BLOG_SETTINGS, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

/// Both slug columns are checked against both candidate slugs: the
/// public route resolves either language, so a cross-language clash
/// would make one article unreachable.
async fn slugs_taken(slug_nl: &str, slug_en: &str, exclude_id: Option<&str>) -> Result<bool, Error> {
    let mut select = blog_articles::Entity::find().filter(
        Condition::any()
            .add(blog_articles::Column::SlugNl.eq(slug_nl))
            .add(blog_articles::Column::SlugEn.eq(slug_nl))
            .add(blog_articles::Column::SlugNl.eq(slug_en))
            .add(blog_articles::Column::SlugEn.eq(slug_en)),
    );
    if let Some(id) = exclude_id {
        select = select.filter(blog_articles::Column::Id.ne(id));
    }
    let clash = select.one(get_db_pool()).await.map_err(|e| {
        log::error!("Failed to check article slugs: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;
    Ok(clash.is_some())
}

#[get("/api/admin/blog")]
async fn admin_list_articles(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let articles = blog_articles::Entity::find()
        .order_by_desc(blog_articles::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load blog articles: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(articles))
}

#[post("/api/admin/blog")]
async fn create_article(
    ctx: AdminCtx,
    form: web::Json<BlogArticleForm>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let form = form.into_inner();
    form.validate().map_err(error::ErrorBadRequest)?;

    let row = form.create_model();
    // create_model derives empty slugs from the titles, so check the
    // values actually about to be stored.
    let (slug_nl, slug_en) = match (&row.slug_nl, &row.slug_en) {
        (Set(nl), Set(en)) => (nl.clone(), en.clone()),
        _ => return Err(error::ErrorInternalServerError("Slug derivation failed")),
    };
    if slugs_taken(&slug_nl, &slug_en, None).await? {
        return Err(error::ErrorConflict("An article with this slug already exists"));
    }

    let created = row.insert(get_db_pool()).await.map_err(|e| {
        log::error!("Failed to create blog article: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    invalidate_blog_caches();
    Ok(HttpResponse::Ok().json(created))
}

#[put("/api/admin/blog/{id}")]
async fn update_article(
    ctx: AdminCtx,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = blog_articles::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load blog article: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Article not found"))?;

    let mut base = serde_json::to_value(BlogArticleForm::from_model(&existing)).map_err(|e| {
        log::error!("Failed to serialize article form: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let form: BlogArticleForm = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed article payload: {}", e)))?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let row = form.update_model(&existing);
    let (slug_nl, slug_en) = match (&row.slug_nl, &row.slug_en) {
        (Set(nl), Set(en)) => (nl.clone(), en.clone()),
        _ => (existing.slug_nl.clone(), existing.slug_en.clone()),
    };
    if slugs_taken(&slug_nl, &slug_en, Some(&existing.id)).await? {
        return Err(error::ErrorConflict("An article with this slug already exists"));
    }

    let updated = row.update(db).await.map_err(|e| {
        log::error!("Failed to update blog article: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    invalidate_blog_caches();
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/api/admin/blog/{id}")]
async fn delete_article(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let result = blog_articles::Entity::delete_by_id(path.into_inner())
        .exec(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to delete blog article: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if result.rows_affected == 0 {
        return Err(error::ErrorNotFound("Article not found"));
    }

    invalidate_blog_caches();
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/admin/comments")]
async fn admin_list_comments(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let comments = blog_comments::Entity::find()
        .order_by_desc(blog_comments::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load comments: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(comments))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModerationBody {
    is_approved: bool,
}

#[put("/api/admin/comments/{id}")]
async fn moderate_comment(
    ctx: AdminCtx,
    path: web::Path<String>,
    body: web::Json<ModerationBody>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let comment = blog_comments::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load comment: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Comment not found"))?;

    let mut active = comment.into_active_model();
    active.is_approved = Set(body.is_approved);
    let updated = active.update(db).await.map_err(|e| {
        log::error!("Failed to moderate comment: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/api/admin/comments/{id}")]
async fn delete_comment(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let result = blog_comments::Entity::delete_by_id(path.into_inner())
        .exec(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to delete comment: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if result.rows_affected == 0 {
        return Err(error::ErrorNotFound("Comment not found"));
    }
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/admin/blog-settings")]
async fn admin_view_blog_settings(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let settings = blog_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load blog settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_blog_settings);
    Ok(HttpResponse::Ok().json(settings))
}

#[put("/api/admin/blog-settings")]
async fn update_blog_settings(
    ctx: AdminCtx,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = blog_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load blog settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    let exists = existing.is_some();

    let base_model = existing.unwrap_or_else(seed_data::default_blog_settings);
    let mut base = serde_json::to_value(&base_model).map_err(|e| {
        log::error!("Failed to serialize blog settings: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let mut merged: blog_settings::Model = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed blog settings: {}", e)))?;
    merged.id = SINGLETON_ID.to_owned();
    merged.updated_at = Utc::now().naive_utc();

    let row = seed_data::blog_settings_row(merged);
    let saved = if exists {
        row.update(db).await
    } else {
        row.insert(db).await
    }
    .map_err(|e| {
        log::error!("Failed to store blog settings: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_BLOG_SETTINGS);
    Ok(HttpResponse::Ok().json(saved))
}
