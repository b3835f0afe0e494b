//! Contact form field editor.
//!
//! Besides plain field CRUD this computes the paired order swap for the
//! up/down reorder buttons. Adjacency is positional: fields are ranked
//! by `order` ascending with insertion order breaking ties, and the
//! neighbor is the previous/next element of that ranking, not the
//! closest order value.

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::content::lists;
use crate::orm::contact_form_settings::{self, FieldType};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// The two order writes produced by one move; the gateway applies both
/// inside a single transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderSwap {
    pub moving_id: String,
    pub moving_order: i32,
    pub adjacent_id: String,
    pub adjacent_order: i32,
}

/// Plans the order swap for moving one field a single step. Returns
/// None when the field is unknown or already at that edge.
pub fn plan_move(
    fields: &[contact_form_settings::Model],
    field_id: &str,
    direction: MoveDirection,
) -> Option<OrderSwap> {
    let mut ranked: Vec<&contact_form_settings::Model> = fields.iter().collect();
    // Stable sort: equal orders keep their insertion order.
    ranked.sort_by_key(|field| field.order);

    let position = ranked.iter().position(|field| field.id == field_id)?;
    let neighbor = match direction {
        MoveDirection::Up => position.checked_sub(1)?,
        MoveDirection::Down => {
            if position + 1 >= ranked.len() {
                return None;
            }
            position + 1
        }
    };

    Some(OrderSwap {
        moving_id: ranked[position].id.clone(),
        moving_order: ranked[neighbor].order,
        adjacent_id: ranked[neighbor].id.clone(),
        adjacent_order: ranked[position].order,
    })
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactFieldForm {
    #[validate(length(min = 1))]
    pub field_key: String,
    #[validate(length(min = 1))]
    pub label_nl: String,
    #[validate(length(min = 1))]
    pub label_en: String,
    pub placeholder_nl: Option<String>,
    pub placeholder_en: Option<String>,
    pub field_type: FieldType,
    pub options: Vec<String>,
    pub validation_rules: Option<serde_json::Value>,
    pub is_required: bool,
    pub is_visible: bool,
    pub order: i32,
}

impl Default for ContactFieldForm {
    fn default() -> Self {
        Self {
            field_key: String::new(),
            label_nl: String::new(),
            label_en: String::new(),
            placeholder_nl: None,
            placeholder_en: None,
            field_type: FieldType::Text,
            options: Vec::new(),
            validation_rules: None,
            is_required: false,
            is_visible: true,
            order: 0,
        }
    }
}

impl ContactFieldForm {
    pub fn from_model(field: &contact_form_settings::Model) -> Self {
        Self {
            field_key: field.field_key.clone(),
            label_nl: field.label_nl.clone(),
            label_en: field.label_en.clone(),
            placeholder_nl: field.placeholder_nl.clone(),
            placeholder_en: field.placeholder_en.clone(),
            field_type: field.field_type.clone(),
            options: lists::strings(field.options.as_ref()),
            validation_rules: field.validation_rules.clone(),
            is_required: field.is_required,
            is_visible: field.is_visible,
            order: field.order,
        }
    }

    // Only select fields carry an options list.
    fn options_column(&self) -> Option<serde_json::Value> {
        if self.field_type.has_options() {
            Some(lists::to_json(&self.options))
        } else {
            None
        }
    }

    pub fn create_model(self) -> contact_form_settings::ActiveModel {
        let now = Utc::now().naive_utc();
        let options = self.options_column();
        contact_form_settings::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            field_key: Set(self.field_key.trim().to_owned()),
            label_nl: Set(self.label_nl.trim().to_owned()),
            label_en: Set(self.label_en.trim().to_owned()),
            placeholder_nl: Set(self.placeholder_nl),
            placeholder_en: Set(self.placeholder_en),
            field_type: Set(self.field_type),
            options: Set(options),
            validation_rules: Set(self.validation_rules),
            is_required: Set(self.is_required),
            is_visible: Set(self.is_visible),
            order: Set(self.order),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    /// `field_key` is assigned at creation and never rewritten; the
    /// submitted key is ignored here.
    pub fn update_model(
        self,
        existing: &contact_form_settings::Model,
    ) -> contact_form_settings::ActiveModel {
        let options = self.options_column();
        contact_form_settings::ActiveModel {
            id: Set(existing.id.clone()),
            label_nl: Set(self.label_nl.trim().to_owned()),
            label_en: Set(self.label_en.trim().to_owned()),
            placeholder_nl: Set(self.placeholder_nl),
            placeholder_en: Set(self.placeholder_en),
            field_type: Set(self.field_type),
            options: Set(options),
            validation_rules: Set(self.validation_rules),
            is_required: Set(self.is_required),
            is_visible: Set(self.is_visible),
            order: Set(self.order),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
    }
}
