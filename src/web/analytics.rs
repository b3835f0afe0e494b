//! First-party page analytics: a public tracking endpoint and the admin
//! stats view.
//!
//! Events are plain rows; the stats endpoint aggregates them on demand
//! with SQL rather than keeping counters. Tracking accepts anything with
//! an event type so the front-end can add event kinds without a deploy.

use actix_web::http::header;
use actix_web::{error, get, post, web, Error, HttpRequest, HttpResponse};
use chrono::{Duration, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbBackend, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Statement,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::db::get_db_pool;
use crate::ip::extract_client_ip;
use crate::middleware::AdminCtx;
use crate::orm::analytics_events;

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(track_event).service(view_stats);
}

const RECENT_EVENT_LIMIT: u64 = 20;
const TOP_PAGE_LIMIT: u64 = 10;
const DEFAULT_STATS_DAYS: i64 = 30;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TrackForm {
    event_type: String,
    page_path: Option<String>,
    referrer: Option<String>,
    metadata: Option<Value>,
}

#[post("/api/analytics/track")]
async fn track_event(req: HttpRequest, form: web::Json<TrackForm>) -> Result<HttpResponse, Error> {
    let form = form.into_inner();
    if form.event_type.trim().is_empty() {
        return Err(error::ErrorBadRequest("An event type is required"));
    }

    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    analytics_events::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        event_type: Set(form.event_type.trim().to_owned()),
        page_path: Set(form.page_path),
        referrer: Set(form.referrer),
        user_agent: Set(user_agent),
        ip_address: Set(extract_client_ip(&req)),
        metadata: Set(form.metadata),
        created_at: Set(Utc::now().naive_utc()),
    }
    .insert(get_db_pool())
    .await
    .map_err(|e| {
        log::error!("Failed to store analytics event: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[derive(Debug, FromQueryResult, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventTypeCount {
    event_type: String,
    count: i64,
}

#[derive(Debug, FromQueryResult, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageCount {
    page_path: String,
    count: i64,
}

#[derive(Debug, Deserialize)]
struct StatsQuery {
    days: Option<i64>,
}

#[get("/api/admin/analytics/stats")]
async fn view_stats(ctx: AdminCtx, query: web::Query<StatsQuery>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let days = match query.days {
        Some(days) if days > 0 => days,
        _ => DEFAULT_STATS_DAYS,
    };
    let cutoff = Utc::now().naive_utc() - Duration::days(days);

    let total = analytics_events::Entity::find()
        .filter(analytics_events::Column::CreatedAt.gte(cutoff))
        .count(db)
        .await
        .map_err(|e| {
            log::error!("Failed to count analytics events: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    let counts_by_type = EventTypeCount::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Postgres,
        r#"
        SELECT event_type, COUNT(*) AS count
        FROM analytics_events
        WHERE created_at >= $1
        GROUP BY event_type
        ORDER BY count DESC
        "#,
        [cutoff.into()],
    ))
    .all(db)
    .await
    .map_err(|e| {
        log::error!("Failed to aggregate event types: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    let top_pages = PageCount::find_by_statement(Statement::from_sql_and_values(
        DbBackend::Postgres,
        r#"
        SELECT page_path, COUNT(*) AS count
        FROM analytics_events
        WHERE created_at >= $1 AND page_path IS NOT NULL
        GROUP BY page_path
        ORDER BY count DESC
        LIMIT $2
        "#,
        [cutoff.into(), (TOP_PAGE_LIMIT as i64).into()],
    ))
    .all(db)
    .await
    .map_err(|e| {
        log::error!("Failed to aggregate top pages: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    let recent = analytics_events::Entity::find()
        .filter(analytics_events::Column::CreatedAt.gte(cutoff))
        .order_by_desc(analytics_events::Column::CreatedAt)
        .limit(RECENT_EVENT_LIMIT)
        .all(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load recent events: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    Ok(HttpResponse::Ok().json(json!({
        "days": days,
        "totalEvents": total,
        "countsByType": counts_by_type,
        "topPages": top_pages,
        "recentEvents": recent,
    })))
}
