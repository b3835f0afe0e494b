pub mod app_config;
pub mod cache;
pub mod constants;
pub mod content;
pub mod db;
pub mod editor;
pub mod email;
pub mod ip;
pub mod middleware;
pub mod orm;
pub mod seed_data;
pub mod session;
pub mod site_config;
pub mod storage;
pub mod web;

pub use middleware::AdminCtx;
