//! Dedicated "about us" page content (singleton).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "about_us_page")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title_nl: String,
    pub title_en: String,
    pub subtitle_nl: Option<String>,
    pub subtitle_en: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub story_nl: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub story_en: Option<String>,
    /// Company values, list of bilingual title/description records.
    pub company_values: Option<Json>,
    pub header_image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
