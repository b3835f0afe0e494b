//! Blog article editor.
//!
//! The form carries the session-scoped derivation state: slugs follow
//! their titles until touched (and never for a stored article), meta
//! descriptions are filled from the excerpt at most once, reading time
//! is computed from the Dutch body at submit.

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::META_DESCRIPTION_MAX_CHARS;
use crate::content::slug::slugify;
use crate::content::{lists, reading_time, tags, text, Language};
use crate::orm::blog_articles;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogArticleForm {
    #[validate(length(min = 1))]
    pub title_nl: String,
    #[validate(length(min = 1))]
    pub title_en: String,
    pub slug_nl: String,
    pub slug_en: String,
    pub excerpt_nl: String,
    pub excerpt_en: String,
    #[validate(length(min = 1))]
    pub content_nl: String,
    #[validate(length(min = 1))]
    pub content_en: String,
    pub featured_image: Option<String>,
    pub author_name: Option<String>,
    pub tags_nl: Vec<String>,
    pub tags_en: Vec<String>,
    pub meta_description_nl: String,
    pub meta_description_en: String,
    pub keywords_nl: Option<String>,
    pub keywords_en: Option<String>,
    pub is_featured: bool,
    pub is_published: bool,
    pub og_type: String,
    pub twitter_card: String,
    #[serde(skip)]
    slug_nl_touched: bool,
    #[serde(skip)]
    slug_en_touched: bool,
    #[serde(skip)]
    meta_nl_filled: bool,
    #[serde(skip)]
    meta_en_filled: bool,
}

impl Default for BlogArticleForm {
    fn default() -> Self {
        Self {
            title_nl: String::new(),
            title_en: String::new(),
            slug_nl: String::new(),
            slug_en: String::new(),
            excerpt_nl: String::new(),
            excerpt_en: String::new(),
            content_nl: String::new(),
            content_en: String::new(),
            featured_image: None,
            author_name: None,
            tags_nl: Vec::new(),
            tags_en: Vec::new(),
            meta_description_nl: String::new(),
            meta_description_en: String::new(),
            keywords_nl: None,
            keywords_en: None,
            is_featured: false,
            is_published: false,
            og_type: "article".to_owned(),
            twitter_card: "summary_large_image".to_owned(),
            slug_nl_touched: false,
            slug_en_touched: false,
            meta_nl_filled: false,
            meta_en_filled: false,
        }
    }
}

impl BlogArticleForm {
    /// Form for editing a stored article. Slugs are latched so a title
    /// change never rewrites a published URL; meta descriptions only
    /// stay latched when a value was stored.
    pub fn from_model(article: &blog_articles::Model) -> Self {
        Self {
            title_nl: article.title_nl.clone(),
            title_en: article.title_en.clone(),
            slug_nl: article.slug_nl.clone(),
            slug_en: article.slug_en.clone(),
            excerpt_nl: article.excerpt_nl.clone().unwrap_or_default(),
            excerpt_en: article.excerpt_en.clone().unwrap_or_default(),
            content_nl: article.content_nl.clone(),
            content_en: article.content_en.clone(),
            featured_image: article.featured_image.clone(),
            author_name: article.author_name.clone(),
            tags_nl: lists::strings(article.tags_nl.as_ref()),
            tags_en: lists::strings(article.tags_en.as_ref()),
            meta_description_nl: article.meta_description_nl.clone().unwrap_or_default(),
            meta_description_en: article.meta_description_en.clone().unwrap_or_default(),
            keywords_nl: article.keywords_nl.clone(),
            keywords_en: article.keywords_en.clone(),
            is_featured: article.is_featured,
            is_published: article.is_published,
            og_type: article.og_type.clone(),
            twitter_card: article.twitter_card.clone(),
            slug_nl_touched: true,
            slug_en_touched: true,
            meta_nl_filled: article.meta_description_nl.is_some(),
            meta_en_filled: article.meta_description_en.is_some(),
        }
    }

    /// Updates the Dutch title; the slug follows along until it has been
    /// edited by hand.
    pub fn set_title_nl(&mut self, title: &str) {
        self.title_nl = title.to_owned();
        if !self.slug_nl_touched {
            self.slug_nl = slugify(title);
        }
    }

    pub fn set_title_en(&mut self, title: &str) {
        self.title_en = title.to_owned();
        if !self.slug_en_touched {
            self.slug_en = slugify(title);
        }
    }

    /// A hand-edited slug stops following the title for the rest of the
    /// session.
    pub fn set_slug_nl(&mut self, slug: &str) {
        self.slug_nl = slug.to_owned();
        self.slug_nl_touched = true;
    }

    pub fn set_slug_en(&mut self, slug: &str) {
        self.slug_en = slug.to_owned();
        self.slug_en_touched = true;
    }

    /// Updates the Dutch excerpt and, at most once per session, fills an
    /// empty meta description with its first 160 characters.
    pub fn set_excerpt_nl(&mut self, excerpt: &str) {
        self.excerpt_nl = excerpt.to_owned();
        if !self.meta_nl_filled && self.meta_description_nl.trim().is_empty() && !excerpt.trim().is_empty()
        {
            self.meta_description_nl = text::truncate_chars(excerpt, META_DESCRIPTION_MAX_CHARS);
            self.meta_nl_filled = true;
        }
    }

    pub fn set_excerpt_en(&mut self, excerpt: &str) {
        self.excerpt_en = excerpt.to_owned();
        if !self.meta_en_filled && self.meta_description_en.trim().is_empty() && !excerpt.trim().is_empty()
        {
            self.meta_description_en = text::truncate_chars(excerpt, META_DESCRIPTION_MAX_CHARS);
            self.meta_en_filled = true;
        }
    }

    /// A manual meta description is never overwritten by the auto-fill.
    pub fn set_meta_description_nl(&mut self, meta: &str) {
        self.meta_description_nl = meta.to_owned();
        self.meta_nl_filled = true;
    }

    pub fn set_meta_description_en(&mut self, meta: &str) {
        self.meta_description_en = meta.to_owned();
        self.meta_en_filled = true;
    }

    pub fn add_tag(&mut self, language: Language, tag: &str) -> bool {
        match language {
            Language::Nl => tags::add_tag(&mut self.tags_nl, tag),
            Language::En => tags::add_tag(&mut self.tags_en, tag),
        }
    }

    pub fn remove_tag(&mut self, language: Language, index: usize) -> Option<String> {
        match language {
            Language::Nl => tags::remove_tag(&mut self.tags_nl, index),
            Language::En => tags::remove_tag(&mut self.tags_en, index),
        }
    }

    // Submit-time fallbacks for forms that arrived over the wire
    // without going through the setters.
    fn apply_fallbacks(&mut self) {
        if self.meta_description_nl.trim().is_empty() && !self.excerpt_nl.trim().is_empty() {
            self.meta_description_nl =
                text::truncate_chars(self.excerpt_nl.trim(), META_DESCRIPTION_MAX_CHARS);
        }
        if self.meta_description_en.trim().is_empty() && !self.excerpt_en.trim().is_empty() {
            self.meta_description_en =
                text::truncate_chars(self.excerpt_en.trim(), META_DESCRIPTION_MAX_CHARS);
        }
    }

    /// Payload for a brand-new article. Empty slugs are derived from the
    /// titles; reading time comes from the Dutch body; `published_at` is
    /// stamped only when the article is born published.
    pub fn create_model(mut self) -> blog_articles::ActiveModel {
        self.apply_fallbacks();
        let now = Utc::now().naive_utc();
        let slug_nl = match self.slug_nl.trim() {
            "" => slugify(&self.title_nl),
            s => s.to_owned(),
        };
        let slug_en = match self.slug_en.trim() {
            "" => slugify(&self.title_en),
            s => s.to_owned(),
        };

        blog_articles::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title_nl: Set(self.title_nl.trim().to_owned()),
            title_en: Set(self.title_en.trim().to_owned()),
            slug_nl: Set(slug_nl),
            slug_en: Set(slug_en),
            excerpt_nl: Set(text::non_empty(&self.excerpt_nl)),
            excerpt_en: Set(text::non_empty(&self.excerpt_en)),
            content_nl: Set(self.content_nl.clone()),
            content_en: Set(self.content_en.clone()),
            featured_image: Set(self.featured_image),
            author_name: Set(self.author_name),
            tags_nl: Set(Some(lists::to_json(&self.tags_nl))),
            tags_en: Set(Some(lists::to_json(&self.tags_en))),
            meta_description_nl: Set(text::non_empty(&self.meta_description_nl)),
            meta_description_en: Set(text::non_empty(&self.meta_description_en)),
            keywords_nl: Set(self.keywords_nl),
            keywords_en: Set(self.keywords_en),
            reading_time: Set(reading_time::estimate_minutes(&self.content_nl, Language::Nl)),
            view_count: Set(0),
            is_featured: Set(self.is_featured),
            is_published: Set(self.is_published),
            published_at: Set(self.is_published.then(|| now)),
            og_type: Set(self.og_type),
            twitter_card: Set(self.twitter_card),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    /// Payload updating a stored article. Slugs are never regenerated
    /// here; an empty submitted slug keeps the stored one. The publish
    /// stamp is written on the first false→true flip and then left
    /// alone; `created_at` and `view_count` are untouched.
    pub fn update_model(mut self, existing: &blog_articles::Model) -> blog_articles::ActiveModel {
        self.apply_fallbacks();
        let now = Utc::now().naive_utc();
        let slug_nl = match self.slug_nl.trim() {
            "" => existing.slug_nl.clone(),
            s => s.to_owned(),
        };
        let slug_en = match self.slug_en.trim() {
            "" => existing.slug_en.clone(),
            s => s.to_owned(),
        };
        let published_at = existing
            .published_at
            .or_else(|| self.is_published.then(|| now));

        blog_articles::ActiveModel {
            id: Set(existing.id.clone()),
            title_nl: Set(self.title_nl.trim().to_owned()),
            title_en: Set(self.title_en.trim().to_owned()),
            slug_nl: Set(slug_nl),
            slug_en: Set(slug_en),
            excerpt_nl: Set(text::non_empty(&self.excerpt_nl)),
            excerpt_en: Set(text::non_empty(&self.excerpt_en)),
            content_nl: Set(self.content_nl.clone()),
            content_en: Set(self.content_en.clone()),
            featured_image: Set(self.featured_image),
            author_name: Set(self.author_name),
            tags_nl: Set(Some(lists::to_json(&self.tags_nl))),
            tags_en: Set(Some(lists::to_json(&self.tags_en))),
            meta_description_nl: Set(text::non_empty(&self.meta_description_nl)),
            meta_description_en: Set(text::non_empty(&self.meta_description_en)),
            keywords_nl: Set(self.keywords_nl),
            keywords_en: Set(self.keywords_en),
            reading_time: Set(reading_time::estimate_minutes(&self.content_nl, Language::Nl)),
            is_featured: Set(self.is_featured),
            is_published: Set(self.is_published),
            published_at: Set(published_at),
            og_type: Set(self.og_type),
            twitter_card: Set(self.twitter_card),
            updated_at: Set(now),
            ..Default::default()
        }
    }
}
