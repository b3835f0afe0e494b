//! Social/sustainability initiatives of the company.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company_initiatives")]
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
    pub image: Option<String>,
    pub icon: Option<String>,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
