//! RSS and Atom feeds of the published blog.
//!
//! Feeds are rebuilt from the database at most once per TTL window and
//! kept in a process-local cache; blog mutations and the admin cache
//! flush drop them early.

use actix_web::{error, get, web, Error, HttpResponse};
use atom_syndication::{
    ContentBuilder, EntryBuilder, FeedBuilder as AtomFeedBuilder, LinkBuilder, PersonBuilder,
    TextBuilder,
};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use std::time::{Duration, Instant};

use crate::app_config;
use crate::constants::SINGLETON_ID;
use crate::db::get_db_pool;
use crate::orm::{blog_articles, blog_settings};
use crate::seed_data;

const FEED_ITEM_LIMIT: u64 = 25;
const FEED_CACHE_TTL_SECS: u64 = 300; // 5 minutes

/// Cached feed entry with content and timestamp
struct CachedFeed {
    content: String,
    cached_at: Instant,
}

/// Global feed cache
static FEED_CACHE: Lazy<DashMap<String, CachedFeed>> = Lazy::new(DashMap::new);

/// Get cached feed if valid, otherwise return None
fn get_cached_feed(key: &str) -> Option<String> {
    if let Some(entry) = FEED_CACHE.get(key) {
        if entry.cached_at.elapsed() < Duration::from_secs(FEED_CACHE_TTL_SECS) {
            return Some(entry.content.clone());
        }
    }
    None
}

/// Store feed in cache
fn cache_feed(key: String, content: String) {
    FEED_CACHE.insert(
        key,
        CachedFeed {
            content,
            cached_at: Instant::now(),
        },
    );
}

/// Drops all cached feeds; called after blog mutations.
pub fn clear_feed_cache() {
    FEED_CACHE.clear();
}

pub fn configure(conf: &mut web::ServiceConfig) {
    conf.service(blog_rss_feed).service(blog_atom_feed);
}

/// Heading and subtitle for the feed, from the blog settings singleton.
async fn feed_heading() -> (String, String) {
    let site = app_config::site();
    let settings = blog_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .unwrap_or_else(|e| {
            log::error!("Failed to load blog settings for feed: {}", e);
            None
        })
        .unwrap_or_else(seed_data::default_blog_settings);

    let title = format!(
        "{} - {}",
        site.name,
        settings.title_nl.unwrap_or_else(|| "Blog".to_owned())
    );
    let description = settings
        .subtitle_nl
        .unwrap_or_else(|| format!("Artikelen en nieuws van {}", site.name));
    (title, description)
}

async fn published_articles() -> Result<Vec<blog_articles::Model>, Error> {
    blog_articles::Entity::find()
        .filter(blog_articles::Column::IsPublished.eq(true))
        .order_by_desc(blog_articles::Column::PublishedAt)
        .limit(FEED_ITEM_LIMIT)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to fetch articles for feed: {}", e);
            error::ErrorInternalServerError("Failed to generate feed")
        })
}

fn article_summary(article: &blog_articles::Model) -> String {
    match &article.excerpt_nl {
        Some(excerpt) if !excerpt.is_empty() => excerpt.clone(),
        _ => truncate_content(&article.content_nl, 500),
    }
}

/// RSS feed of the published blog articles
#[get("/feed.rss")]
async fn blog_rss_feed() -> Result<HttpResponse, Error> {
    let cache_key = "rss:blog".to_string();

    if let Some(cached) = get_cached_feed(&cache_key) {
        return Ok(HttpResponse::Ok()
            .content_type("application/rss+xml; charset=utf-8")
            .body(cached));
    }

    let articles = published_articles().await?;
    let site_url = app_config::site().base_url.trim_end_matches('/').to_owned();
    let (feed_title, feed_description) = feed_heading().await;

    let mut items = Vec::new();
    for article in articles {
        let link = format!("{}/blog/{}", site_url, article.slug_nl);
        let guid = GuidBuilder::default()
            .value(link.clone())
            .permalink(true)
            .build();

        let mut item_builder = ItemBuilder::default();
        item_builder
            .title(Some(article.title_nl.clone()))
            .link(Some(link))
            .description(Some(article_summary(&article)))
            .pub_date(Some(
                article
                    .published_at
                    .unwrap_or(article.created_at)
                    .format("%a, %d %b %Y %H:%M:%S GMT")
                    .to_string(),
            ))
            .guid(Some(guid));

        if let Some(author_name) = article.author_name {
            item_builder.author(Some(author_name));
        }

        items.push(item_builder.build());
    }

    let channel = ChannelBuilder::default()
        .title(feed_title)
        .link(format!("{}/blog", site_url))
        .description(feed_description)
        .items(items)
        .build();

    let content = channel.to_string();
    cache_feed(cache_key, content.clone());

    Ok(HttpResponse::Ok()
        .content_type("application/rss+xml; charset=utf-8")
        .body(content))
}

/// Atom feed of the published blog articles
#[get("/feed.atom")]
async fn blog_atom_feed() -> Result<HttpResponse, Error> {
    let cache_key = "atom:blog".to_string();

    if let Some(cached) = get_cached_feed(&cache_key) {
        return Ok(HttpResponse::Ok()
            .content_type("application/atom+xml; charset=utf-8")
            .body(cached));
    }

    let articles = published_articles().await?;
    let site_url = app_config::site().base_url.trim_end_matches('/').to_owned();
    let (feed_title, feed_description) = feed_heading().await;

    let mut entries = Vec::new();
    let mut latest_updated: Option<DateTime<FixedOffset>> = None;

    for article in articles {
        let link = format!("{}/blog/{}", site_url, article.slug_nl);
        let updated = naive_to_fixed_offset(article.published_at.unwrap_or(article.created_at));

        if latest_updated.is_none() || Some(updated) > latest_updated {
            latest_updated = Some(updated);
        }

        let mut entry_builder = EntryBuilder::default();
        entry_builder
            .id(link.clone())
            .title(TextBuilder::default().value(article.title_nl.clone()).build())
            .link(
                LinkBuilder::default()
                    .href(link)
                    .rel("alternate".to_string())
                    .build(),
            )
            .summary(Some(
                TextBuilder::default()
                    .value(article_summary(&article))
                    .build(),
            ))
            .content(Some(
                ContentBuilder::default()
                    .content_type(Some("html".to_string()))
                    .value(Some(article.content_nl.clone()))
                    .build(),
            ))
            .updated(updated)
            .published(Some(updated));

        if let Some(author_name) = article.author_name {
            entry_builder.authors(vec![PersonBuilder::default().name(author_name).build()]);
        }

        entries.push(entry_builder.build());
    }

    let blog_url = format!("{}/blog", site_url);
    let feed = AtomFeedBuilder::default()
        .id(blog_url.clone())
        .title(TextBuilder::default().value(feed_title).build())
        .subtitle(Some(
            TextBuilder::default().value(feed_description).build(),
        ))
        .link(
            LinkBuilder::default()
                .href(blog_url)
                .rel("alternate".to_string())
                .build(),
        )
        .link(
            LinkBuilder::default()
                .href(format!("{}/feed.atom", site_url))
                .rel("self".to_string())
                .mime_type(Some("application/atom+xml".to_string()))
                .build(),
        )
        .updated(latest_updated.unwrap_or_else(|| Utc::now().fixed_offset()))
        .entries(entries)
        .build();

    let content = feed.to_string();
    cache_feed(cache_key, content.clone());

    Ok(HttpResponse::Ok()
        .content_type("application/atom+xml; charset=utf-8")
        .body(content))
}

/// Convert NaiveDateTime to DateTime<FixedOffset> (assuming UTC)
fn naive_to_fixed_offset(dt: NaiveDateTime) -> DateTime<FixedOffset> {
    DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc).fixed_offset()
}

/// Truncate content to a maximum character count, adding an ellipsis
/// when something was cut.
fn truncate_content(content: &str, max_len: usize) -> String {
    if content.chars().count() <= max_len {
        content.to_string()
    } else {
        let truncated: String = content.chars().take(max_len).collect();
        format!("{}...", truncated.trim_end())
    }
}
