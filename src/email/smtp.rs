//! SMTP delivery via lettre's async transport.

use super::{EmailError, EmailResult};
use crate::app_config::EmailConfig;
use lettre::message::{header::ContentType, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Send an email via SMTP
pub async fn send_email(
    config: &EmailConfig,
    from_name: &str,
    from_address: &str,
    to: &str,
    subject: &str,
    body_text: &str,
    body_html: Option<&str>,
) -> EmailResult<()> {
    // Parse email addresses
    let from: Mailbox = format!("{} <{}>", from_name, from_address)
        .parse()
        .map_err(|e| EmailError::ConfigError(format!("Invalid from address: {}", e)))?;

    let to_string = to.to_string();
    let to: Mailbox = to
        .parse()
        .map_err(|e| EmailError::ConfigError(format!("Invalid to address: {}", e)))?;

    // Build the email
    let email_builder = Message::builder().from(from).to(to).subject(subject);

    // Add body (either plain text only, or multipart with HTML)
    let email = if let Some(html) = body_html {
        email_builder.multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(body_text.to_string()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(html.to_string()),
                ),
        )?
    } else {
        email_builder
            .header(ContentType::TEXT_PLAIN)
            .body(body_text.to_string())?
    };

    // Create SMTP transport
    let mut builder = if config.smtp_tls {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
    };
    builder = builder.port(config.smtp_port);

    // Credentials are optional so a local relay without auth works
    if !config.smtp_username.is_empty() {
        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());
        builder = builder.credentials(creds);
    }

    let mailer = builder.build();

    // Send the email
    mailer.send(email).await?;

    log::info!("Email sent successfully to: {}", to_string);

    Ok(())
}
