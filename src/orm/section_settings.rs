//! Per-section visibility and ordering for the public site.
//!
//! One row per named section; `section_key` is assigned once and never
//! regenerated. `order` drives both navigation and footer sequence.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "section_settings")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub section_key: String,
    pub name_nl: Option<String>,
    pub name_en: Option<String>,
    pub is_visible: bool,
    pub show_in_header: bool,
    pub show_in_footer: bool,
    pub order: i32,
    pub route: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
