//! Project editor and gallery operations.
//!
//! The gallery is a Json column of image records rather than bare urls,
//! so uploads keep their original name and size around for the manager
//! UI. `featured_image` stores the promoted url itself, not an index
//! into the gallery, so it survives reordering. Removing the promoted
//! image clears the field instead of leaving it pointing at a gone url.

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::content::{lists, text};
use crate::orm::projects;

/// One gallery entry as stored in the `gallery` Json column.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

impl GalleryImage {
    /// Builds a fresh record for an uploaded file.
    pub fn new(url: String, original_name: Option<String>, size: Option<i64>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url,
            thumbnail_url: None,
            original_name,
            size,
        }
    }
}

/// Appends an uploaded image to the gallery.
pub fn append_image(gallery: &mut Vec<GalleryImage>, image: GalleryImage) {
    gallery.push(image);
}

/// Removes the image with the given id, clearing the featured slot when
/// it held that url. Returns the removed record, or None when no entry
/// matches.
pub fn remove_image(
    gallery: &mut Vec<GalleryImage>,
    image_id: &str,
    featured: &mut Option<String>,
) -> Option<GalleryImage> {
    let index = gallery.iter().position(|image| image.id == image_id)?;
    let removed = gallery.remove(index);
    if featured.as_deref() == Some(removed.url.as_str()) {
        *featured = None;
    }
    Some(removed)
}

/// Promotes a gallery image to featured. Refused for urls not in the
/// gallery.
pub fn set_featured(gallery: &[GalleryImage], url: &str, featured: &mut Option<String>) -> bool {
    if gallery.iter().any(|image| image.url == url) {
        *featured = Some(url.to_owned());
        true
    } else {
        false
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectForm {
    #[validate(length(min = 1))]
    pub title_nl: String,
    #[validate(length(min = 1))]
    pub title_en: String,
    #[validate(length(min = 1))]
    pub description_nl: String,
    #[validate(length(min = 1))]
    pub description_en: String,
    pub location: Option<String>,
    pub category_nl: Option<String>,
    pub category_en: Option<String>,
    pub image: Option<String>,
    pub gallery: Vec<GalleryImage>,
    pub featured_image: Option<String>,
    pub year: Option<i32>,
    pub order: i32,
    pub is_active: bool,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self {
            title_nl: String::new(),
            title_en: String::new(),
            description_nl: String::new(),
            description_en: String::new(),
            location: None,
            category_nl: None,
            category_en: None,
            image: None,
            gallery: Vec::new(),
            featured_image: None,
            year: None,
            order: 0,
            is_active: true,
        }
    }
}

impl ProjectForm {
    pub fn from_model(project: &projects::Model) -> Self {
        Self {
            title_nl: project.title_nl.clone(),
            title_en: project.title_en.clone(),
            description_nl: project.description_nl.clone(),
            description_en: project.description_en.clone(),
            location: project.location.clone(),
            category_nl: project.category_nl.clone(),
            category_en: project.category_en.clone(),
            image: project.image.clone(),
            gallery: lists::records(project.gallery.as_ref()),
            featured_image: project.featured_image.clone(),
            year: project.year,
            order: project.order,
            is_active: project.is_active,
        }
    }

    // A featured url that no longer appears in the gallery is dropped
    // at submit.
    fn featured_column(&self) -> Option<String> {
        self.featured_image
            .as_ref()
            .filter(|url| self.gallery.iter().any(|image| &&image.url == url))
            .cloned()
    }

    pub fn create_model(self) -> projects::ActiveModel {
        let now = Utc::now().naive_utc();
        let featured_image = self.featured_column();
        projects::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title_nl: Set(self.title_nl.trim().to_owned()),
            title_en: Set(self.title_en.trim().to_owned()),
            description_nl: Set(self.description_nl.clone()),
            description_en: Set(self.description_en.clone()),
            location: Set(self.location.as_deref().and_then(text::non_empty)),
            category_nl: Set(self.category_nl),
            category_en: Set(self.category_en),
            image: Set(self.image),
            gallery: Set(Some(lists::to_json(&self.gallery))),
            featured_image: Set(featured_image),
            year: Set(self.year),
            order: Set(self.order),
            is_active: Set(self.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    pub fn update_model(self, existing: &projects::Model) -> projects::ActiveModel {
        let featured_image = self.featured_column();
        projects::ActiveModel {
            id: Set(existing.id.clone()),
            title_nl: Set(self.title_nl.trim().to_owned()),
            title_en: Set(self.title_en.trim().to_owned()),
            description_nl: Set(self.description_nl.clone()),
            description_en: Set(self.description_en.clone()),
            location: Set(self.location.as_deref().and_then(text::non_empty)),
            category_nl: Set(self.category_nl),
            category_en: Set(self.category_en),
            image: Set(self.image),
            gallery: Set(Some(lists::to_json(&self.gallery))),
            featured_image: Set(featured_image),
            year: Set(self.year),
            order: Set(self.order),
            is_active: Set(self.is_active),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
    }
}
