//! Email composition.
//!
//! Each message kind has a bilingual built-in template; an active row in
//! `email_templates` with the matching `template_key` overrides it from
//! the admin panel. Placeholders use `{{name}}` syntax in both subject
//! and body. Overrides are plain text; only the built-ins carry an HTML
//! alternative part.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use super::{send_email, EmailResult};
use crate::app_config;
use crate::orm::contact_inquiries;
use crate::orm::email_logs::DeliveryStatus;
use crate::orm::email_templates;

pub const TEMPLATE_CONTACT_CONFIRMATION: &str = "contact_confirmation";
pub const TEMPLATE_CONTACT_NOTIFICATION: &str = "contact_notification";
pub const TEMPLATE_PASSWORD_RESET: &str = "password_reset";

/// Replaces every `{{name}}` placeholder with its value. Unknown
/// placeholders are left in place so a typo in a stored template is
/// visible in the delivered mail instead of silently vanishing.
fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_owned();
    for (name, value) in vars {
        out = out.replace(&format!("{{{{{}}}}}", name), value);
    }
    out
}

/// Looks up an active stored override for the template key, picking the
/// requested language's subject and body.
async fn stored_override(
    db: &DatabaseConnection,
    template_key: &str,
    language: &str,
) -> Option<(String, String)> {
    let row = email_templates::Entity::find()
        .filter(email_templates::Column::TemplateKey.eq(template_key))
        .filter(email_templates::Column::IsActive.eq(true))
        .one(db)
        .await
        .unwrap_or_else(|e| {
            log::error!("Failed to load email template {}: {}", template_key, e);
            None
        })?;

    if language == "en" {
        Some((row.subject_en, row.body_en))
    } else {
        Some((row.subject_nl, row.body_nl))
    }
}

/// Confirmation mail to the visitor who submitted the contact form, in
/// the language of the submission.
pub async fn send_contact_confirmation(
    db: &DatabaseConnection,
    inquiry: &contact_inquiries::Model,
    language: &str,
) -> EmailResult<DeliveryStatus> {
    let site = app_config::site();
    let vars: Vec<(&str, &str)> = vec![
        ("first_name", inquiry.first_name.as_str()),
        ("last_name", inquiry.last_name.as_str()),
        ("site_name", site.name.as_str()),
    ];

    if let Some((subject, body)) =
        stored_override(db, TEMPLATE_CONTACT_CONFIRMATION, language).await
    {
        let subject = render(&subject, &vars);
        let body = render(&body, &vars);
        return send_email(
            db,
            &inquiry.email,
            &subject,
            &body,
            None,
            Some(TEMPLATE_CONTACT_CONFIRMATION),
        )
        .await;
    }

    let (subject, body_text) = if language == "en" {
        (
            format!("Thank you for your message, {}", inquiry.first_name),
            format!(
                r#"Dear {} {},

Thank you for contacting us. We have received your message and will
get back to you as soon as possible, usually within two working days.

Kind regards,
{}
"#,
                inquiry.first_name, inquiry.last_name, site.name
            ),
        )
    } else {
        (
            format!("Bedankt voor uw bericht, {}", inquiry.first_name),
            format!(
                r#"Beste {} {},

Bedankt voor uw bericht. We hebben uw aanvraag ontvangen en nemen zo
snel mogelijk contact met u op, meestal binnen twee werkdagen.

Met vriendelijke groet,
{}
"#,
                inquiry.first_name, inquiry.last_name, site.name
            ),
        )
    };

    let body_html = format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <p style="white-space: pre-line;">{}</p>
    </div>
</body>
</html>"#,
        body_text
    );

    send_email(
        db,
        &inquiry.email,
        &subject,
        &body_text,
        Some(&body_html),
        Some(TEMPLATE_CONTACT_CONFIRMATION),
    )
    .await
}

/// Notification mail to the configured admin address about a new
/// contact inquiry.
pub async fn send_contact_notification(
    db: &DatabaseConnection,
    inquiry: &contact_inquiries::Model,
    notification_address: &str,
) -> EmailResult<DeliveryStatus> {
    let phone = inquiry.phone.as_deref().unwrap_or("-");
    let company = inquiry.company.as_deref().unwrap_or("-");
    let project_type = inquiry.project_type.as_deref().unwrap_or("-");
    let vars: Vec<(&str, &str)> = vec![
        ("first_name", inquiry.first_name.as_str()),
        ("last_name", inquiry.last_name.as_str()),
        ("email", inquiry.email.as_str()),
        ("phone", phone),
        ("company", company),
        ("project_type", project_type),
        ("message", inquiry.message.as_str()),
    ];

    let language = app_config::site().default_language;
    if let Some((subject, body)) =
        stored_override(db, TEMPLATE_CONTACT_NOTIFICATION, &language).await
    {
        let subject = render(&subject, &vars);
        let body = render(&body, &vars);
        return send_email(
            db,
            notification_address,
            &subject,
            &body,
            None,
            Some(TEMPLATE_CONTACT_NOTIFICATION),
        )
        .await;
    }

    let subject = format!(
        "Nieuwe aanvraag via het contactformulier van {} {}",
        inquiry.first_name, inquiry.last_name
    );
    let body_text = format!(
        r#"Er is een nieuwe aanvraag binnengekomen via het contactformulier.

Naam: {} {}
E-mail: {}
Telefoon: {}
Bedrijf: {}
Type project: {}

Bericht:
{}
"#,
        inquiry.first_name, inquiry.last_name, inquiry.email, phone, company, project_type,
        inquiry.message
    );

    let body_html = format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2>Nieuwe aanvraag via het contactformulier</h2>
        <p><strong>Naam:</strong> {} {}</p>
        <p><strong>E-mail:</strong> {}</p>
        <p><strong>Telefoon:</strong> {}</p>
        <p><strong>Bedrijf:</strong> {}</p>
        <p><strong>Type project:</strong> {}</p>
        <p><strong>Bericht:</strong></p>
        <div style="background: #f8f9fa; border-left: 4px solid #007bff; padding: 15px;">
            <p style="margin: 0; white-space: pre-wrap;">{}</p>
        </div>
    </div>
</body>
</html>"#,
        inquiry.first_name,
        inquiry.last_name,
        inquiry.email,
        phone,
        company,
        project_type,
        inquiry.message
    );

    send_email(
        db,
        notification_address,
        &subject,
        &body_text,
        Some(&body_html),
        Some(TEMPLATE_CONTACT_NOTIFICATION),
    )
    .await
}

/// Send a password reset email
pub async fn send_password_reset_email(
    db: &DatabaseConnection,
    to: &str,
    name: &str,
    reset_token: &str,
) -> EmailResult<DeliveryStatus> {
    let site = app_config::site();
    let reset_link = format!(
        "{}/reset-password?token={}",
        site.base_url.trim_end_matches('/'),
        reset_token
    );
    let vars: Vec<(&str, &str)> = vec![
        ("name", name),
        ("reset_link", reset_link.as_str()),
        ("site_name", site.name.as_str()),
    ];

    if let Some((subject, body)) =
        stored_override(db, TEMPLATE_PASSWORD_RESET, &site.default_language).await
    {
        let subject = render(&subject, &vars);
        let body = render(&body, &vars);
        return send_email(db, to, &subject, &body, None, Some(TEMPLATE_PASSWORD_RESET)).await;
    }

    let body_text = format!(
        r#"Beste {},

Er is een verzoek gedaan om het wachtwoord van uw account opnieuw in
te stellen. Gebruik de onderstaande link; deze is één uur geldig.

{}

Heeft u dit verzoek niet gedaan, dan kunt u deze e-mail negeren.

Met vriendelijke groet,
{}
"#,
        name, reset_link, site.name
    );

    let body_html = format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2>Wachtwoord opnieuw instellen</h2>
        <p>Beste <strong>{}</strong>,</p>
        <p>Er is een verzoek gedaan om het wachtwoord van uw account
        opnieuw in te stellen. Klik op de knop hieronder; de link is
        één uur geldig.</p>
        <p style="margin: 30px 0;">
            <a href="{}"
               style="background-color: #007bff; color: white; padding: 12px 24px;
                      text-decoration: none; border-radius: 4px; display: inline-block;">
                Wachtwoord instellen
            </a>
        </p>
        <p>Of kopieer deze link naar uw browser:</p>
        <p style="word-break: break-all; color: #007bff;">{}</p>
        <hr style="margin: 30px 0; border: none; border-top: 1px solid #ddd;">
        <p style="color: #666; font-size: 0.9em;">
            Heeft u dit verzoek niet gedaan, dan kunt u deze e-mail negeren.
        </p>
    </div>
</body>
</html>"#,
        name, reset_link, reset_link
    );

    send_email(
        db,
        to,
        "Wachtwoord opnieuw instellen",
        &body_text,
        Some(&body_html),
        Some(TEMPLATE_PASSWORD_RESET),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_known_placeholders() {
        let out = render(
            "Beste {{first_name}} {{last_name}},",
            &[("first_name", "Anja"), ("last_name", "de Vries")],
        );
        assert_eq!(out, "Beste Anja de Vries,");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders_visible() {
        let out = render("Hallo {{voornaam}}", &[("first_name", "Anja")]);
        assert_eq!(out, "Hallo {{voornaam}}");
    }

    #[test]
    fn test_render_repeated_placeholder() {
        let out = render("{{name}} en nog eens {{name}}", &[("name", "Jan")]);
        assert_eq!(out, "Jan en nog eens Jan");
    }
}
