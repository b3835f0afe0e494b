//! Completed and ongoing construction projects.
//!
//! `gallery` is a Json sequence of image records; `featured_image` holds
//! the url of the promoted gallery entry and is cleared when that entry
//! is removed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title_nl: String,
    pub title_en: String,
    #[sea_orm(column_type = "Text")]
    pub description_nl: String,
    #[sea_orm(column_type = "Text")]
    pub description_en: String,
    pub location: Option<String>,
    pub category_nl: Option<String>,
    pub category_en: Option<String>,
    pub image: Option<String>,
    pub gallery: Option<Json>,
    pub featured_image: Option<String>,
    pub year: Option<i32>,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
