//! SeaORM entities, one module per table.

pub mod about_content;
pub mod about_us_page;
pub mod analytics_events;
pub mod blog_articles;
pub mod blog_comments;
pub mod blog_settings;
pub mod company_details;
pub mod company_initiatives;
pub mod company_initiatives_settings;
pub mod contact_form_settings;
pub mod contact_info;
pub mod contact_inquiries;
pub mod content_backups;
pub mod email_logs;
pub mod email_settings;
pub mod email_templates;
pub mod footer_settings;
pub mod hero_content;
pub mod initiative_statistics;
pub mod legal_pages;
pub mod media_files;
pub mod newsletter_subscriptions;
pub mod partners;
pub mod partners_settings;
pub mod projects;
pub mod section_settings;
pub mod services;
pub mod sessions;
pub mod site_settings;
pub mod social_media_links;
pub mod statistics;
pub mod statistics_settings;
pub mod team_members;
pub mod team_settings;
pub mod testimonials;
pub mod testimonials_settings;
pub mod users;
