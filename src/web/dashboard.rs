//! Admin dashboard summary and cache management.

use actix_web::{error, get, post, Error, HttpResponse};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde_json::json;

use crate::cache;
use crate::db::get_db_pool;
use crate::middleware::AdminCtx;
use crate::orm::contact_inquiries::{self, InquiryStatus};
use crate::orm::{
    blog_articles, media_files, newsletter_subscriptions, partners, projects, services,
    team_members, testimonials,
};

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_dashboard).service(clear_cache);
}

const RECENT_INQUIRY_LIMIT: u64 = 5;

async fn count_all<E: EntityTrait>() -> Result<usize, Error>
where
    E::Model: Sync,
{
    E::find().count(get_db_pool()).await.map_err(|e| {
        log::error!("Failed to count rows: {}", e);
        error::ErrorInternalServerError("Database error")
    })
}

#[get("/api/admin/dashboard")]
async fn view_dashboard(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let projects = count_all::<projects::Entity>().await?;
    let services = count_all::<services::Entity>().await?;
    let blog_articles = count_all::<blog_articles::Entity>().await?;
    let testimonials = count_all::<testimonials::Entity>().await?;
    let team_members = count_all::<team_members::Entity>().await?;
    let partners = count_all::<partners::Entity>().await?;
    let media_files = count_all::<media_files::Entity>().await?;
    let inquiries = count_all::<contact_inquiries::Entity>().await?;

    let new_inquiries = contact_inquiries::Entity::find()
        .filter(contact_inquiries::Column::Status.eq(InquiryStatus::New))
        .count(db)
        .await
        .map_err(|e| {
            log::error!("Failed to count new inquiries: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    let subscribers = newsletter_subscriptions::Entity::find()
        .filter(newsletter_subscriptions::Column::IsActive.eq(true))
        .count(db)
        .await
        .map_err(|e| {
            log::error!("Failed to count subscribers: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    let recent_inquiries = contact_inquiries::Entity::find()
        .order_by_desc(contact_inquiries::Column::CreatedAt)
        .limit(RECENT_INQUIRY_LIMIT)
        .all(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load recent inquiries: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    Ok(HttpResponse::Ok().json(json!({
        "counts": {
            "projects": projects,
            "services": services,
            "blogArticles": blog_articles,
            "testimonials": testimonials,
            "teamMembers": team_members,
            "partners": partners,
            "mediaFiles": media_files,
            "inquiries": inquiries,
            "newInquiries": new_inquiries,
            "activeSubscribers": subscribers,
        },
        "recentInquiries": recent_inquiries,
    })))
}

#[post("/api/admin/cache/clear")]
async fn clear_cache(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    let user = ctx.require_admin()?;

    cache::clear();
    super::feed::clear_feed_cache();
    log::info!("Content cache cleared by {}", user.email);

    Ok(HttpResponse::Ok().json(json!({ "message": "Cache cleared" })))
}
