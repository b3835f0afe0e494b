//! Outgoing email.
//!
//! Sending goes through lettre SMTP, or mock mode which only logs. Every
//! attempt — delivered, failed or mocked — is recorded in `email_logs` so
//! the admin panel can show delivery history. Sender identity comes from
//! the application config, overridable per-field through the
//! `email_settings` singleton row.

pub mod smtp;
pub mod templates;

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::app_config;
use crate::constants::SINGLETON_ID;
use crate::orm::email_logs::{self, DeliveryStatus};
use crate::orm::email_settings;

/// Email sending result
pub type EmailResult<T> = Result<T, EmailError>;

/// Email errors
#[derive(Debug)]
pub enum EmailError {
    /// SMTP configuration error
    ConfigError(String),
    /// Email building error
    BuildError(lettre::error::Error),
    /// Email sending error
    SendError(lettre::transport::smtp::Error),
}

impl std::fmt::Display for EmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailError::ConfigError(msg) => write!(f, "Email config error: {}", msg),
            EmailError::BuildError(e) => write!(f, "Email build error: {}", e),
            EmailError::SendError(e) => write!(f, "Email send error: {}", e),
        }
    }
}

impl std::error::Error for EmailError {}

impl From<lettre::error::Error> for EmailError {
    fn from(e: lettre::error::Error) -> Self {
        EmailError::BuildError(e)
    }
}

impl From<lettre::transport::smtp::Error> for EmailError {
    fn from(e: lettre::transport::smtp::Error) -> Self {
        EmailError::SendError(e)
    }
}

/// Sender identity and notification toggles in effect, after applying
/// the `email_settings` row on top of the application config.
#[derive(Clone, Debug)]
pub struct EffectiveSettings {
    pub from_name: String,
    pub from_address: String,
    /// Address receiving contact-inquiry notifications
    pub notification_address: String,
    pub send_visitor_confirmation: bool,
    pub send_admin_notification: bool,
}

/// Resolves the settings to send with. A missing singleton row means
/// config values and both notification kinds enabled.
pub async fn effective_settings(db: &DatabaseConnection) -> EffectiveSettings {
    let config = app_config::email();
    let row = email_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await
        .unwrap_or_else(|e| {
            log::error!("Failed to load email settings: {}", e);
            None
        });

    match row {
        Some(settings) => EffectiveSettings {
            from_name: settings.from_name.unwrap_or(config.from_name),
            from_address: settings.from_address.unwrap_or(config.from_address),
            notification_address: settings
                .notification_address
                .unwrap_or(config.admin_address),
            send_visitor_confirmation: settings.send_visitor_confirmation,
            send_admin_notification: settings.send_admin_notification,
        },
        None => EffectiveSettings {
            from_name: config.from_name,
            from_address: config.from_address,
            notification_address: config.admin_address,
            send_visitor_confirmation: true,
            send_admin_notification: true,
        },
    }
}

/// Send an email, recording the attempt in `email_logs`.
///
/// In mock mode the message is logged instead of delivered and the log
/// row gets status `mocked`. A transport failure is recorded as `failed`
/// and returned; the caller decides whether that fails its request.
pub async fn send_email(
    db: &DatabaseConnection,
    to: &str,
    subject: &str,
    body_text: &str,
    body_html: Option<&str>,
    template_key: Option<&str>,
) -> EmailResult<DeliveryStatus> {
    let config = app_config::email();
    let settings = effective_settings(db).await;

    if config.mock {
        // Mock mode: just log the email
        log::info!("MOCK EMAIL:");
        log::info!("  To: {}", to);
        log::info!("  Subject: {}", subject);
        log::info!("  Body: {}", body_text);
        record_delivery(db, to, subject, template_key, DeliveryStatus::Mocked, None).await;
        return Ok(DeliveryStatus::Mocked);
    }

    match smtp::send_email(
        &config,
        &settings.from_name,
        &settings.from_address,
        to,
        subject,
        body_text,
        body_html,
    )
    .await
    {
        Ok(()) => {
            record_delivery(db, to, subject, template_key, DeliveryStatus::Sent, None).await;
            Ok(DeliveryStatus::Sent)
        }
        Err(e) => {
            record_delivery(
                db,
                to,
                subject,
                template_key,
                DeliveryStatus::Failed,
                Some(e.to_string()),
            )
            .await;
            Err(e)
        }
    }
}

/// Writes one `email_logs` row. A failure to record never masks the
/// delivery outcome; it only gets logged.
async fn record_delivery(
    db: &DatabaseConnection,
    to: &str,
    subject: &str,
    template_key: Option<&str>,
    status: DeliveryStatus,
    error: Option<String>,
) {
    let entry = email_logs::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        recipient: Set(to.to_owned()),
        subject: Set(subject.to_owned()),
        template_key: Set(template_key.map(str::to_owned)),
        status: Set(status),
        error: Set(error),
        created_at: Set(Utc::now().naive_utc()),
    };
    if let Err(e) = entry.insert(db).await {
        log::error!("Failed to record email delivery to {}: {}", to, e);
    }
}
