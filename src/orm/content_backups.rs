//! Row snapshots taken before risky edits.
//!
//! `expires_at` is advisory; rows are only removed by the maintenance
//! binary, never by a background reaper.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "content_backups")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Section identifier, e.g. "blog" or "projects".
    pub content_type: String,
    pub content_id: String,
    pub data: Json,
    pub created_by: Option<String>,
    pub created_at: DateTime,
    pub expires_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
