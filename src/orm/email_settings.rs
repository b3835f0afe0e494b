//! Email behavior toggles editable from the admin panel (singleton).
//!
//! SMTP transport credentials live in the application config, not here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "email_settings")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub from_name: Option<String>,
    pub from_address: Option<String>,
    /// Address receiving contact-inquiry notifications.
    pub notification_address: Option<String>,
    pub send_visitor_confirmation: bool,
    pub send_admin_notification: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
