//! Contact form field configuration.
//!
//! One row per form field; `field_key` is assigned once and never
//! regenerated. `options` is only populated for select fields.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Input widget rendered for a contact form field.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(Some(20))")]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[sea_orm(string_value = "text")]
    #[default]
    Text,
    #[sea_orm(string_value = "email")]
    Email,
    #[sea_orm(string_value = "tel")]
    Tel,
    #[sea_orm(string_value = "textarea")]
    Textarea,
    #[sea_orm(string_value = "select")]
    Select,
}

impl FieldType {
    /// Select fields are the only ones carrying an options list.
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_form_settings")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub field_key: String,
    pub label_nl: String,
    pub label_en: String,
    pub placeholder_nl: Option<String>,
    pub placeholder_en: Option<String>,
    pub field_type: FieldType,
    /// Ordered string list, select fields only.
    pub options: Option<Json>,
    pub validation_rules: Option<Json>,
    pub is_required: bool,
    pub is_visible: bool,
    pub order: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
