//! Test fixtures for creating test data
#![allow(dead_code)]
#![allow(clippy::needless_update)]

use chrono::Utc;
use sea_orm::{entity::*, ActiveValue::Set, DatabaseConnection, DbErr};
use uuid::Uuid;

use bouwcms::content::slug::slugify;
use bouwcms::orm::{
    blog_articles, contact_form_settings, newsletter_subscriptions, section_settings, services,
    testimonials, users,
};

/// Test admin fixture
pub struct TestAdmin {
    pub id: String,
    pub email: String,
    pub password: String, // Plain text password for testing
}

/// Create an active admin account with known credentials
pub async fn create_test_admin(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<TestAdmin, DbErr> {
    let hash = bouwcms::session::hash_password(password)
        .map_err(|e| DbErr::Custom(format!("Password hashing failed: {}", e)))?;
    let now = Utc::now().naive_utc();

    let user = users::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        email: Set(email.to_lowercase()),
        password: Set(hash),
        first_name: Set(Some("Test".to_owned())),
        last_name: Set(Some("Beheerder".to_owned())),
        role: Set("admin".to_owned()),
        is_active: Set(true),
        reset_token: Set(None),
        reset_token_expiry: Set(None),
        last_login_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    Ok(TestAdmin {
        id: user.id,
        email: user.email,
        password: password.to_string(),
    })
}

/// Create a deactivated admin account (login must refuse it)
pub async fn create_inactive_admin(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<TestAdmin, DbErr> {
    let admin = create_test_admin(db, email, password).await?;
    users::ActiveModel {
        id: Set(admin.id.clone()),
        is_active: Set(false),
        ..Default::default()
    }
    .update(db)
    .await?;
    Ok(admin)
}

/// Create a blog article; slugs are derived from the titles
pub async fn create_test_article(
    db: &DatabaseConnection,
    title_nl: &str,
    title_en: &str,
    published: bool,
) -> Result<blog_articles::Model, DbErr> {
    let now = Utc::now().naive_utc();

    blog_articles::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        title_nl: Set(title_nl.to_owned()),
        title_en: Set(title_en.to_owned()),
        slug_nl: Set(slugify(title_nl)),
        slug_en: Set(slugify(title_en)),
        excerpt_nl: Set(None),
        excerpt_en: Set(None),
        content_nl: Set("Inhoud van het artikel.".to_owned()),
        content_en: Set("Body of the article.".to_owned()),
        featured_image: Set(None),
        author_name: Set(Some("Redactie".to_owned())),
        tags_nl: Set(None),
        tags_en: Set(None),
        meta_description_nl: Set(None),
        meta_description_en: Set(None),
        keywords_nl: Set(None),
        keywords_en: Set(None),
        reading_time: Set(1),
        view_count: Set(0),
        is_featured: Set(false),
        is_published: Set(published),
        published_at: Set(published.then(|| now)),
        og_type: Set("article".to_owned()),
        twitter_card: Set("summary_large_image".to_owned()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
}

/// Create a service row
pub async fn create_test_service(
    db: &DatabaseConnection,
    title_nl: &str,
    order: i32,
) -> Result<services::Model, DbErr> {
    let now = Utc::now().naive_utc();

    services::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        title_nl: Set(title_nl.to_owned()),
        title_en: Set(format!("{} (en)", title_nl)),
        description_nl: Set("Vakwerk van fundering tot dak.".to_owned()),
        description_en: Set("Craftsmanship from foundation to roof.".to_owned()),
        icon: Set(Some("hammer".to_owned())),
        image: Set(None),
        order: Set(order),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
}

/// Create a contact form field
pub async fn create_test_contact_field(
    db: &DatabaseConnection,
    field_key: &str,
    order: i32,
    is_required: bool,
    is_visible: bool,
) -> Result<contact_form_settings::Model, DbErr> {
    let now = Utc::now().naive_utc();

    contact_form_settings::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        field_key: Set(field_key.to_owned()),
        label_nl: Set(format!("Veld {}", field_key)),
        label_en: Set(format!("Field {}", field_key)),
        placeholder_nl: Set(None),
        placeholder_en: Set(None),
        field_type: Set(contact_form_settings::FieldType::Text),
        options: Set(None),
        validation_rules: Set(None),
        is_required: Set(is_required),
        is_visible: Set(is_visible),
        order: Set(order),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
}

/// Create a testimonial row
pub async fn create_test_testimonial(
    db: &DatabaseConnection,
    customer_name: &str,
    order: i32,
    is_active: bool,
) -> Result<testimonials::Model, DbErr> {
    let now = Utc::now().naive_utc();

    testimonials::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        customer_name: Set(customer_name.to_owned()),
        company: Set(None),
        testimonial_nl: Set("Geweldig werk!".to_owned()),
        testimonial_en: Set("Great work!".to_owned()),
        rating: Set(5),
        image: Set(None),
        featured: Set(false),
        order: Set(order),
        is_active: Set(is_active),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
}

/// Create a section settings row
pub async fn create_test_section(
    db: &DatabaseConnection,
    section_key: &str,
    order: i32,
    is_visible: bool,
) -> Result<section_settings::Model, DbErr> {
    let now = Utc::now().naive_utc();

    section_settings::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        section_key: Set(section_key.to_owned()),
        name_nl: Set(Some(section_key.to_owned())),
        name_en: Set(Some(section_key.to_owned())),
        is_visible: Set(is_visible),
        show_in_header: Set(true),
        show_in_footer: Set(false),
        order: Set(order),
        route: Set(Some(format!("/{}", section_key))),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
}

/// Create a newsletter subscription
pub async fn create_test_subscriber(
    db: &DatabaseConnection,
    email: &str,
    is_active: bool,
) -> Result<newsletter_subscriptions::Model, DbErr> {
    let now = Utc::now().naive_utc();

    newsletter_subscriptions::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        email: Set(email.to_lowercase()),
        is_active: Set(is_active),
        unsubscribe_token: Set(format!("token-{}", Uuid::new_v4().simple())),
        subscribed_at: Set(now),
        unsubscribed_at: Set((!is_active).then(|| now)),
    }
    .insert(db)
    .await
}
