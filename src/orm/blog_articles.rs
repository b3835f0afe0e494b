//! Blog articles.
//!
//! Slugs are unique per language. `reading_time` is derived at submit
//! time, `view_count` is bumped by the public read path only, and
//! `published_at` is written exactly once when the article first
//! becomes published.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_articles")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title_nl: String,
    pub title_en: String,
    #[sea_orm(unique)]
    pub slug_nl: String,
    #[sea_orm(unique)]
    pub slug_en: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub excerpt_nl: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub excerpt_en: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content_nl: String,
    #[sea_orm(column_type = "Text")]
    pub content_en: String,
    pub featured_image: Option<String>,
    pub author_name: Option<String>,
    /// Ordered string list, duplicates fended off by the editor.
    pub tags_nl: Option<Json>,
    pub tags_en: Option<Json>,
    pub meta_description_nl: Option<String>,
    pub meta_description_en: Option<String>,
    pub keywords_nl: Option<String>,
    pub keywords_en: Option<String>,
    pub reading_time: i32,
    pub view_count: i32,
    pub is_featured: bool,
    pub is_published: bool,
    pub published_at: Option<DateTime>,
    pub og_type: String,
    pub twitter_card: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::blog_comments::Entity")]
    Comments,
}

impl Related<super::blog_comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
