//! Testimonial editor.

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::content::text;
use crate::orm::testimonials;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct TestimonialForm {
    #[validate(length(min = 1))]
    pub customer_name: String,
    pub company: Option<String>,
    #[validate(length(min = 1))]
    pub testimonial_nl: String,
    pub testimonial_en: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    pub image: Option<String>,
    pub featured: bool,
    pub order: i32,
    pub is_active: bool,
}

impl Default for TestimonialForm {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            company: None,
            testimonial_nl: String::new(),
            testimonial_en: String::new(),
            rating: 5,
            image: None,
            featured: false,
            order: 0,
            is_active: true,
        }
    }
}

impl TestimonialForm {
    pub fn from_model(testimonial: &testimonials::Model) -> Self {
        Self {
            customer_name: testimonial.customer_name.clone(),
            company: testimonial.company.clone(),
            testimonial_nl: testimonial.testimonial_nl.clone(),
            testimonial_en: testimonial.testimonial_en.clone(),
            rating: testimonial.rating,
            image: testimonial.image.clone(),
            featured: testimonial.featured,
            order: testimonial.order,
            is_active: testimonial.is_active,
        }
    }

    /// An untranslated testimonial falls back to the Dutch text so the
    /// English site never renders an empty quote.
    fn english_text(&self) -> String {
        match text::non_empty(&self.testimonial_en) {
            Some(en) => en,
            None => self.testimonial_nl.trim().to_owned(),
        }
    }

    pub fn create_model(self) -> testimonials::ActiveModel {
        let now = Utc::now().naive_utc();
        let testimonial_en = self.english_text();
        testimonials::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            customer_name: Set(self.customer_name.trim().to_owned()),
            company: Set(self.company),
            testimonial_nl: Set(self.testimonial_nl.trim().to_owned()),
            testimonial_en: Set(testimonial_en),
            rating: Set(self.rating),
            image: Set(self.image),
            featured: Set(self.featured),
            order: Set(self.order),
            is_active: Set(self.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    pub fn update_model(self, existing: &testimonials::Model) -> testimonials::ActiveModel {
        let testimonial_en = self.english_text();
        testimonials::ActiveModel {
            id: Set(existing.id.clone()),
            customer_name: Set(self.customer_name.trim().to_owned()),
            company: Set(self.company),
            testimonial_nl: Set(self.testimonial_nl.trim().to_owned()),
            testimonial_en: Set(testimonial_en),
            rating: Set(self.rating),
            image: Set(self.image),
            featured: Set(self.featured),
            order: Set(self.order),
            is_active: Set(self.is_active),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
    }
}
