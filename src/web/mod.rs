//! HTTP surface: the public read API and the admin persistence gateway.
//!
//! Each module bundles the public and admin routes of one content
//! domain and registers them through its own `configure`.

pub mod analytics;
pub mod auth;
pub mod backups;
pub mod blog;
pub mod company;
pub mod contact;
pub mod content;
pub mod dashboard;
pub mod email_admin;
pub mod feed;
pub mod image_proxy;
pub mod initiatives;
pub mod legal;
pub mod media;
pub mod newsletter;
pub mod partners;
pub mod projects;
pub mod sections;
pub mod services;
pub mod site_settings;
pub mod team;
pub mod testimonials;

use serde_json::Value;

/// Configures the web app by adding services from each web file.
///
/// @see https://docs.rs/actix-web/4.0.1/actix_web/struct.App.html#method.configure
pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    // Descending order. Order is important.
    // Route resolution will stop at the first match.
    analytics::configure(conf);
    auth::configure(conf);
    backups::configure(conf);
    blog::configure(conf);
    company::configure(conf);
    contact::configure(conf);
    content::configure(conf);
    dashboard::configure(conf);
    email_admin::configure(conf);
    feed::configure(conf);
    image_proxy::configure(conf);
    initiatives::configure(conf);
    legal::configure(conf);
    media::configure(conf);
    newsletter::configure(conf);
    partners::configure(conf);
    projects::configure(conf);
    sections::configure(conf);
    services::configure(conf);
    site_settings::configure(conf);
    team::configure(conf);
    testimonials::configure(conf);
}

/// Keys a partial update may never overwrite; the server owns them.
const PROTECTED_KEYS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// Applies a JSON patch object onto a serialized record, key by key.
///
/// The merge is shallow: a key present in the patch replaces the stored
/// value outright, `null` included, so optional fields can be cleared.
/// Non-object patches are ignored.
pub(crate) fn merge_patch(base: &mut Value, patch: Value) {
    if let (Value::Object(base_map), Value::Object(patch_map)) = (base, patch) {
        for (key, value) in patch_map {
            if PROTECTED_KEYS.contains(&key.as_str()) {
                continue;
            }
            base_map.insert(key, value);
        }
    }
}
