//! Site settings store.
//!
//! Free-form key/value settings edited in the admin panel (tagline,
//! maintenance banner, analytics id, ...). Loaded into a process-wide
//! map at startup and written through to the database on every change,
//! so reads never touch the database.

use chrono::Utc;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

use crate::orm::site_settings;

static SETTINGS: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

/// Loads every stored setting into the in-process map. Called once at
/// startup; safe to call again to refresh.
pub async fn load(db: &DatabaseConnection) -> Result<usize, DbErr> {
    let rows = site_settings::Entity::find().all(db).await?;
    let count = rows.len();
    for row in rows {
        SETTINGS.insert(row.key, row.value);
    }
    log::info!("Loaded {} site settings", count);
    Ok(count)
}

pub fn get(key: &str) -> Option<String> {
    SETTINGS.get(key).map(|entry| entry.value().clone())
}

pub fn get_or(key: &str, default: &str) -> String {
    get(key).unwrap_or_else(|| default.to_owned())
}

/// Upserts a setting by key, writing through to the database first and
/// the map on success. Returns the stored row.
pub async fn set(
    db: &DatabaseConnection,
    key: &str,
    value: &str,
    category: Option<&str>,
) -> Result<site_settings::Model, DbErr> {
    let existing = site_settings::Entity::find()
        .filter(site_settings::Column::Key.eq(key))
        .one(db)
        .await?;
    let now = Utc::now().naive_utc();

    let stored = match existing {
        Some(row) => {
            let mut active: site_settings::ActiveModel = row.into();
            active.value = Set(value.to_owned());
            if let Some(category) = category {
                active.category = Set(Some(category.to_owned()));
            }
            active.updated_at = Set(now);
            active.update(db).await?
        }
        None => {
            site_settings::ActiveModel {
                id: Set(Uuid::new_v4().to_string()),
                key: Set(key.to_owned()),
                value: Set(value.to_owned()),
                category: Set(category.map(str::to_owned)),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(db)
            .await?
        }
    };

    SETTINGS.insert(stored.key.clone(), stored.value.clone());
    Ok(stored)
}

/// Deletes a setting from the database and the map. Returns false when
/// the key was not stored.
pub async fn remove(db: &DatabaseConnection, key: &str) -> Result<bool, DbErr> {
    let existing = site_settings::Entity::find()
        .filter(site_settings::Column::Key.eq(key))
        .one(db)
        .await?;

    match existing {
        Some(row) => {
            row.delete(db).await?;
            SETTINGS.remove(key);
            Ok(true)
        }
        None => Ok(false),
    }
}
