//! Team member profiles.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_members")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub role_nl: String,
    pub role_en: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio_nl: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio_en: Option<String>,
    pub image: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    /// String lists, stored as JSON arrays. None when empty.
    pub specialties: Option<Json>,
    pub skills: Option<Json>,
    pub certifications: Option<Json>,
    pub achievements: Option<Json>,
    pub order: i32,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
