//! Forms for the home-page sections without derivation logic.
//!
//! Hero and about are singletons upserted under the fixed row id;
//! statistics and services are plain ordered collections.

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::SINGLETON_ID;
use crate::content::{lists, text};
use crate::orm::{about_content, hero_content, services, statistics};

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroForm {
    #[validate(length(min = 1))]
    pub title_nl: String,
    #[validate(length(min = 1))]
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
}

impl Default for HeroForm {
    fn default() -> Self {
        Self {
            title_nl: String::new(),
            title_en: String::new(),
            subtitle_nl: None,
            subtitle_en: None,
            primary_button_text_nl: None,
            primary_button_text_en: None,
            primary_button_link: None,
            secondary_button_text_nl: None,
            secondary_button_text_en: None,
            secondary_button_link: None,
            background_image: None,
            is_active: true,
        }
    }
}

impl HeroForm {
    pub fn from_model(hero: &hero_content::Model) -> Self {
        Self {
            title_nl: hero.title_nl.clone(),
            title_en: hero.title_en.clone(),
            subtitle_nl: hero.subtitle_nl.clone(),
            subtitle_en: hero.subtitle_en.clone(),
            primary_button_text_nl: hero.primary_button_text_nl.clone(),
            primary_button_text_en: hero.primary_button_text_en.clone(),
            primary_button_link: hero.primary_button_link.clone(),
            secondary_button_text_nl: hero.secondary_button_text_nl.clone(),
            secondary_button_text_en: hero.secondary_button_text_en.clone(),
            secondary_button_link: hero.secondary_button_link.clone(),
            background_image: hero.background_image.clone(),
            is_active: hero.is_active,
        }
    }

    /// Upsert payload for the singleton row; `created_at` is kept when a
    /// row already exists.
    pub fn into_model(self, existing: Option<&hero_content::Model>) -> hero_content::ActiveModel {
        let now = Utc::now().naive_utc();
        hero_content::ActiveModel {
            id: Set(SINGLETON_ID.to_owned()),
            title_nl: Set(self.title_nl.trim().to_owned()),
            title_en: Set(self.title_en.trim().to_owned()),
            subtitle_nl: Set(self.subtitle_nl),
            subtitle_en: Set(self.subtitle_en),
            primary_button_text_nl: Set(self.primary_button_text_nl),
            primary_button_text_en: Set(self.primary_button_text_en),
            primary_button_link: Set(self.primary_button_link),
            secondary_button_text_nl: Set(self.secondary_button_text_nl),
            secondary_button_text_en: Set(self.secondary_button_text_en),
            secondary_button_link: Set(self.secondary_button_link),
            background_image: Set(self.background_image),
            is_active: Set(self.is_active),
            created_at: Set(existing.map_or(now, |hero| hero.created_at)),
            updated_at: Set(now),
        }
    }
}

/// One bullet in the about section's feature list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutFeature {
    pub icon: Option<String>,
    pub title_nl: String,
    pub title_en: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutForm {
    #[validate(length(min = 1))]
    pub title_nl: String,
    #[validate(length(min = 1))]
    pub title_en: String,
    #[validate(length(min = 1))]
    pub description_nl: String,
    #[validate(length(min = 1))]
    pub description_en: String,
    pub mission_nl: Option<String>,
    pub mission_en: Option<String>,
    pub vision_nl: Option<String>,
    pub vision_en: Option<String>,
    pub image: Option<String>,
    pub features: Vec<AboutFeature>,
    pub is_active: bool,
}

impl Default for AboutForm {
    fn default() -> Self {
        Self {
            title_nl: String::new(),
            title_en: String::new(),
            description_nl: String::new(),
            description_en: String::new(),
            mission_nl: None,
            mission_en: None,
            vision_nl: None,
            vision_en: None,
            image: None,
            features: Vec::new(),
            is_active: true,
        }
    }
}

impl AboutForm {
    pub fn from_model(about: &about_content::Model) -> Self {
        Self {
            title_nl: about.title_nl.clone(),
            title_en: about.title_en.clone(),
            description_nl: about.description_nl.clone(),
            description_en: about.description_en.clone(),
            mission_nl: about.mission_nl.clone(),
            mission_en: about.mission_en.clone(),
            vision_nl: about.vision_nl.clone(),
            vision_en: about.vision_en.clone(),
            image: about.image.clone(),
            features: lists::records(about.features.as_ref()),
            is_active: about.is_active,
        }
    }

    pub fn into_model(self, existing: Option<&about_content::Model>) -> about_content::ActiveModel {
        let now = Utc::now().naive_utc();
        let features = lists::to_json(&self.features);
        about_content::ActiveModel {
            id: Set(SINGLETON_ID.to_owned()),
            title_nl: Set(self.title_nl.trim().to_owned()),
            title_en: Set(self.title_en.trim().to_owned()),
            description_nl: Set(self.description_nl.clone()),
            description_en: Set(self.description_en.clone()),
            mission_nl: Set(self.mission_nl),
            mission_en: Set(self.mission_en),
            vision_nl: Set(self.vision_nl),
            vision_en: Set(self.vision_en),
            image: Set(self.image),
            features: Set(Some(features)),
            is_active: Set(self.is_active),
            created_at: Set(existing.map_or(now, |about| about.created_at)),
            updated_at: Set(now),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct StatisticForm {
    #[validate(length(min = 1))]
    pub label_nl: String,
    #[validate(length(min = 1))]
    pub label_en: String,
    #[validate(length(min = 1))]
    pub value: String,
    pub suffix: Option<String>,
    pub icon: Option<String>,
    pub order: i32,
    pub is_active: bool,
}

impl Default for StatisticForm {
    fn default() -> Self {
        Self {
            label_nl: String::new(),
            label_en: String::new(),
            value: String::new(),
            suffix: None,
            icon: None,
            order: 0,
            is_active: true,
        }
    }
}

impl StatisticForm {
    pub fn from_model(statistic: &statistics::Model) -> Self {
        Self {
            label_nl: statistic.label_nl.clone(),
            label_en: statistic.label_en.clone(),
            value: statistic.value.clone(),
            suffix: statistic.suffix.clone(),
            icon: statistic.icon.clone(),
            order: statistic.order,
            is_active: statistic.is_active,
        }
    }

    pub fn create_model(self) -> statistics::ActiveModel {
        let now = Utc::now().naive_utc();
        statistics::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            label_nl: Set(self.label_nl.trim().to_owned()),
            label_en: Set(self.label_en.trim().to_owned()),
            value: Set(self.value.trim().to_owned()),
            suffix: Set(self.suffix.as_deref().and_then(text::non_empty)),
            icon: Set(self.icon),
            order: Set(self.order),
            is_active: Set(self.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    pub fn update_model(self, existing: &statistics::Model) -> statistics::ActiveModel {
        statistics::ActiveModel {
            id: Set(existing.id.clone()),
            label_nl: Set(self.label_nl.trim().to_owned()),
            label_en: Set(self.label_en.trim().to_owned()),
            value: Set(self.value.trim().to_owned()),
            suffix: Set(self.suffix.as_deref().and_then(text::non_empty)),
            icon: Set(self.icon),
            order: Set(self.order),
            is_active: Set(self.is_active),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceForm {
    #[validate(length(min = 1))]
    pub title_nl: String,
    #[validate(length(min = 1))]
    pub title_en: String,
    #[validate(length(min = 1))]
    pub description_nl: String,
    #[validate(length(min = 1))]
    pub description_en: String,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub order: i32,
    pub is_active: bool,
}

impl Default for ServiceForm {
    fn default() -> Self {
        Self {
            title_nl: String::new(),
            title_en: String::new(),
            description_nl: String::new(),
            description_en: String::new(),
            icon: None,
            image: None,
            order: 0,
            is_active: true,
        }
    }
}

impl ServiceForm {
    pub fn from_model(service: &services::Model) -> Self {
        Self {
            title_nl: service.title_nl.clone(),
            title_en: service.title_en.clone(),
            description_nl: service.description_nl.clone(),
            description_en: service.description_en.clone(),
            icon: service.icon.clone(),
            image: service.image.clone(),
            order: service.order,
            is_active: service.is_active,
        }
    }

    pub fn create_model(self) -> services::ActiveModel {
        let now = Utc::now().naive_utc();
        services::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title_nl: Set(self.title_nl.trim().to_owned()),
            title_en: Set(self.title_en.trim().to_owned()),
            description_nl: Set(self.description_nl.clone()),
            description_en: Set(self.description_en.clone()),
            icon: Set(self.icon),
            image: Set(self.image),
            order: Set(self.order),
            is_active: Set(self.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    pub fn update_model(self, existing: &services::Model) -> services::ActiveModel {
        services::ActiveModel {
            id: Set(existing.id.clone()),
            title_nl: Set(self.title_nl.trim().to_owned()),
            title_en: Set(self.title_en.trim().to_owned()),
            description_nl: Set(self.description_nl.clone()),
            description_en: Set(self.description_en.clone()),
            icon: Set(self.icon),
            image: Set(self.image),
            order: Set(self.order),
            is_active: Set(self.is_active),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
    }
}
