//! Application configuration from file and environment variables
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Environment variables (prefixed with BOUWCMS_)
//! 2. Config file (config.toml)
//! 3. Default values
//!
//! Secrets like database passwords and SMTP credentials should be kept in
//! environment variables, not in the config file.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Global application configuration
pub static APP_CONFIG: Lazy<RwLock<AppConfig>> = Lazy::new(|| {
    RwLock::new(AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config file, using defaults: {}", e);
        AppConfig::default()
    }))
});

/// Site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    pub description: String,
    pub base_url: String,
    /// Default content language served when none is requested
    pub default_language: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Bouwbedrijf CMS".to_string(),
            description: "Content management for a bilingual construction site".to_string(),
            base_url: "http://localhost:8080".to_string(),
            default_language: "nl".to_string(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Send the session cookie with the Secure attribute
    pub secure_cookies: bool,
    /// Session cookie lifetime in days
    pub session_max_age_days: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            secure_cookies: false,
            session_max_age_days: 7,
        }
    }
}

/// Content limits configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// TTL for cached public content responses, in seconds
    pub content_cache_ttl_secs: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            content_cache_ttl_secs: 60,
        }
    }
}

/// Email configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// SMTP server host
    pub smtp_host: String,
    /// SMTP server port
    pub smtp_port: u16,
    /// Use TLS for SMTP
    pub smtp_tls: bool,
    /// SMTP username (if required)
    pub smtp_username: String,
    /// SMTP password (should be in env var BOUWCMS_EMAIL_SMTP_PASSWORD)
    #[serde(default)]
    pub smtp_password: String,
    /// From address for emails
    pub from_address: String,
    /// From name for emails
    pub from_name: String,
    /// Address receiving contact-inquiry notifications
    pub admin_address: String,
    /// Log emails instead of sending them
    pub mock: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "localhost".to_string(),
            smtp_port: 587,
            smtp_tls: true,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: "noreply@localhost".to_string(),
            from_name: "Bouwbedrijf".to_string(),
            admin_address: "info@localhost".to_string(),
            mock: false,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage backend: "local" or "s3"
    pub backend: String,
    /// Local storage path (used when backend = "local")
    pub local_path: String,
    /// URL prefix under which locally stored files are served
    pub local_public_url: String,
    /// S3 endpoint URL (used when backend = "s3")
    pub s3_endpoint: String,
    /// S3 region (used when backend = "s3")
    pub s3_region: String,
    /// S3 bucket name (used when backend = "s3")
    pub s3_bucket: String,
    /// S3 public URL for serving files (used when backend = "s3")
    pub s3_public_url: String,
    /// S3 access key (should be in env var BOUWCMS_STORAGE_S3_ACCESS_KEY)
    #[serde(default)]
    pub s3_access_key: String,
    /// S3 secret key (should be in env var BOUWCMS_STORAGE_S3_SECRET_KEY)
    #[serde(default)]
    pub s3_secret_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "local".to_string(),
            local_path: "./uploads".to_string(),
            local_public_url: "/uploads".to_string(),
            s3_endpoint: "http://localhost:9000".to_string(),
            s3_region: "eu-west-1".to_string(),
            s3_bucket: "bouwcms".to_string(),
            s3_public_url: "http://localhost:9000/bouwcms".to_string(),
            s3_access_key: String::new(),
            s3_secret_key: String::new(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub site: SiteConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub limits: LimitsConfig,
    pub email: EmailConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &str) -> Result<Self, ConfigError> {
        use config::FileFormat;

        let config = Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Add config file (optional)
            .add_source(File::new(path, FileFormat::Toml).required(false))
            // Override with environment variables (BOUWCMS_ prefix)
            // e.g., BOUWCMS_SITE_BASE_URL, BOUWCMS_SERVER_PORT
            .add_source(
                Environment::with_prefix("BOUWCMS")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reload configuration from file
    pub fn reload() -> Result<(), ConfigError> {
        let new_config = Self::load()?;
        if let Ok(mut config) = APP_CONFIG.write() {
            *config = new_config;
            log::info!("Configuration reloaded");
        }
        Ok(())
    }
}

/// Initialize application configuration
///
/// This triggers the lazy loading of the config file and logs the result.
/// Should be called early in application startup.
pub fn init() {
    let config = APP_CONFIG.read().unwrap();
    log::info!("Configuration loaded: site.name = {}", config.site.name);
}

// Convenience functions for accessing global config

/// Get the current application configuration
pub fn get_config() -> AppConfig {
    APP_CONFIG.read().map(|c| c.clone()).unwrap_or_default()
}

/// Get site configuration
pub fn site() -> SiteConfig {
    get_config().site
}

/// Get server configuration
pub fn server() -> ServerConfig {
    get_config().server
}

/// Get security configuration
pub fn security() -> SecurityConfig {
    get_config().security
}

/// Get limits configuration
pub fn limits() -> LimitsConfig {
    get_config().limits
}

/// Get email configuration
pub fn email() -> EmailConfig {
    get_config().email
}

/// Get storage configuration
pub fn storage() -> StorageConfig {
    get_config().storage
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.site.default_language, "nl");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.limits.content_cache_ttl_secs, 60);
        assert_eq!(config.security.session_max_age_days, 7);
    }

    #[test]
    fn test_mock_email_disabled_by_default() {
        let config = AppConfig::default();
        assert!(!config.email.mock);
    }

    #[test]
    fn test_load_from_toml_file() {
        // Create a temporary config file
        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[site]
name = "Bouwbedrijf Jansen"
base_url = "https://www.jansen-bouw.example"
default_language = "en"

[server]
port = 9090

[limits]
content_cache_ttl_secs = 300

[security]
secure_cookies = true
"#
        )
        .unwrap();

        let config = AppConfig::load_from_path(temp_file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.site.name, "Bouwbedrijf Jansen");
        assert_eq!(config.site.base_url, "https://www.jansen-bouw.example");
        assert_eq!(config.site.default_language, "en");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.limits.content_cache_ttl_secs, 300);
        assert!(config.security.secure_cookies);
        // Defaults should still apply for unspecified values
        assert_eq!(config.email.smtp_port, 587);
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let config = AppConfig::load_from_path("/nonexistent/config.toml").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.limits.content_cache_ttl_secs, 60);
    }
}
