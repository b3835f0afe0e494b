//! Home-page "about" section content (singleton).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "about_content")]
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
    pub mission_nl: Option<String>,
    pub mission_en: Option<String>,
    pub vision_nl: Option<String>,
    pub vision_en: Option<String>,
    pub image: Option<String>,
    /// Bullet-point feature list, bilingual entries.
    pub features: Option<Json>,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
