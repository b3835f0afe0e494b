//! Hero banner content (singleton, fixed id "default").

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hero_content")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title_nl: String,
    pub title_en: String,
    pub subtitle_nl: Option<String>,
    pub subtitle_en: Option<String>,
    pub primary_button_text_nl: Option<String>,
    pub primary_button_text_en: Option<String>,
    pub primary_button_link: Option<String>,
    pub secondary_button_text_nl: Option<String>,
    pub secondary_button_text_en: Option<String>,
    pub secondary_button_link: Option<String>,
    pub background_image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
