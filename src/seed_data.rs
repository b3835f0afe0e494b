//! Built-in content defaults and maintenance routines.
//!
//! Singleton readers fall back to these models when their row does not
//! exist yet, the contact-form initialize endpoint inserts
//! [`default_contact_fields`], and the seed binary populates a fresh
//! database through [`seed_defaults`]. The copy mirrors the
//! BouwMeesters Amsterdam demo content.

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::constants::SINGLETON_ID;
use crate::content::lists;
use crate::editor::home::AboutFeature;
use crate::editor::ContentSection;
use crate::orm::{
    about_content, about_us_page, blog_settings, company_details, company_initiatives_settings,
    contact_form_settings, contact_info, content_backups, email_settings, footer_settings,
    hero_content, partners_settings, section_settings, services, sessions, site_settings,
    statistics, statistics_settings, team_settings, testimonials_settings, users,
};

pub fn default_hero() -> hero_content::Model {
    let now = Utc::now().naive_utc();
    hero_content::Model {
        id: SINGLETON_ID.to_owned(),
        title_nl: "Welkom bij BouwMeesters Amsterdam".to_owned(),
        title_en: "Welcome to BouwMeesters Amsterdam".to_owned(),
        subtitle_nl: Some(
            "Uw betrouwbare partner voor professionele bouwoplossingen in Amsterdam".to_owned(),
        ),
        subtitle_en: Some(
            "Your trusted partner for professional construction solutions in Amsterdam".to_owned(),
        ),
        primary_button_text_nl: Some("Neem Contact Op".to_owned()),
        primary_button_text_en: Some("Contact Us".to_owned()),
        primary_button_link: Some("/#contact".to_owned()),
        secondary_button_text_nl: Some("Bekijk Projecten".to_owned()),
        secondary_button_text_en: Some("View Projects".to_owned()),
        secondary_button_link: Some("/#projects".to_owned()),
        background_image: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn default_about() -> about_content::Model {
    let now = Utc::now().naive_utc();
    let features = vec![
        AboutFeature {
            icon: Some("award".to_owned()),
            title_nl: "Kwaliteit".to_owned(),
            title_en: "Quality".to_owned(),
        },
        AboutFeature {
            icon: Some("shield".to_owned()),
            title_nl: "Integriteit".to_owned(),
            title_en: "Integrity".to_owned(),
        },
        AboutFeature {
            icon: Some("lightbulb".to_owned()),
            title_nl: "Innovatie".to_owned(),
            title_en: "Innovation".to_owned(),
        },
        AboutFeature {
            icon: Some("leaf".to_owned()),
            title_nl: "Duurzaamheid".to_owned(),
            title_en: "Sustainability".to_owned(),
        },
    ];
    about_content::Model {
        id: SINGLETON_ID.to_owned(),
        title_nl: "Over BouwMeesters Amsterdam".to_owned(),
        title_en: "About BouwMeesters Amsterdam".to_owned(),
        description_nl: "BouwMeesters Amsterdam is een toonaangevend bouwbedrijf gespecialiseerd \
                         in residentiële en commerciële projecten. Met meer dan twee decennia aan \
                         ervaring leveren wij hoogwaardige bouwoplossingen die voldoen aan de \
                         hoogste normen van kwaliteit en duurzaamheid."
            .to_owned(),
        description_en: "BouwMeesters Amsterdam is a leading construction company specializing in \
                         residential and commercial projects. With more than two decades of \
                         experience, we deliver high-quality construction solutions that meet the \
                         highest standards of quality and sustainability."
            .to_owned(),
        mission_nl: Some(
            "Duurzame en innovatieve bouwoplossingen leveren die de verwachtingen van onze \
             klanten overtreffen."
                .to_owned(),
        ),
        mission_en: Some(
            "Delivering sustainable and innovative construction solutions that exceed our \
             clients' expectations."
                .to_owned(),
        ),
        vision_nl: Some("De meest vertrouwde bouwpartner van Amsterdam zijn.".to_owned()),
        vision_en: Some("To be Amsterdam's most trusted construction partner.".to_owned()),
        image: None,
        features: Some(lists::to_json(&features)),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn default_about_us_page() -> about_us_page::Model {
    let now = Utc::now().naive_utc();
    let values = serde_json::json!([
        {
            "titleNl": "Kwaliteit",
            "titleEn": "Quality",
            "descriptionNl": "Hoogwaardige bouwoplossingen",
            "descriptionEn": "High-quality construction solutions"
        },
        {
            "titleNl": "Integriteit",
            "titleEn": "Integrity",
            "descriptionNl": "Eerlijk en transparant",
            "descriptionEn": "Honest and transparent"
        },
        {
            "titleNl": "Innovatie",
            "titleEn": "Innovation",
            "descriptionNl": "Moderne bouwtechnieken",
            "descriptionEn": "Modern construction techniques"
        },
        {
            "titleNl": "Duurzaamheid",
            "titleEn": "Sustainability",
            "descriptionNl": "Milieuvriendelijk bouwen",
            "descriptionEn": "Environmentally friendly construction"
        }
    ]);
    about_us_page::Model {
        id: SINGLETON_ID.to_owned(),
        title_nl: "Over Ons".to_owned(),
        title_en: "About Us".to_owned(),
        subtitle_nl: Some("Twintig jaar bouwen aan Amsterdam".to_owned()),
        subtitle_en: Some("Twenty years of building Amsterdam".to_owned()),
        story_nl: Some(
            "BouwMeesters Amsterdam begon als een klein familiebedrijf en groeide uit tot een \
             toonaangevende speler in de Amsterdamse bouwsector. Van kleinschalige renovaties \
             tot complete nieuwbouwprojecten: ons vakmanschap staat al twintig jaar garant voor \
             kwaliteit."
                .to_owned(),
        ),
        story_en: Some(
            "BouwMeesters Amsterdam started as a small family business and grew into a leading \
             player in the Amsterdam construction sector. From small-scale renovations to \
             complete new builds, our craftsmanship has guaranteed quality for twenty years."
                .to_owned(),
        ),
        company_values: Some(values),
        header_image: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn default_company_details() -> company_details::Model {
    let now = Utc::now().naive_utc();
    company_details::Model {
        id: SINGLETON_ID.to_owned(),
        company_name: "BouwMeesters Amsterdam BV".to_owned(),
        kvk_number: Some("12345678".to_owned()),
        btw_number: Some("NL123456789B01".to_owned()),
        iban: None,
        address: Some("Bouwstraat 123".to_owned()),
        postal_code: Some("1012 AB".to_owned()),
        city: Some("Amsterdam".to_owned()),
        phone: Some("+31 20 123 4567".to_owned()),
        email: Some("info@bouwmeesters.nl".to_owned()),
        created_at: now,
        updated_at: now,
    }
}

pub fn default_contact_info() -> contact_info::Model {
    let now = Utc::now().naive_utc();
    contact_info::Model {
        id: SINGLETON_ID.to_owned(),
        address: Some("Bouwstraat 123".to_owned()),
        postal_code: Some("1012 AB".to_owned()),
        city: Some("Amsterdam".to_owned()),
        phone: Some("+31 20 123 4567".to_owned()),
        email: Some("info@bouwmeesters.nl".to_owned()),
        opening_hours_nl: Some("Ma t/m Vr: 08:00 - 17:00".to_owned()),
        opening_hours_en: Some("Mon-Fri: 08:00 - 17:00".to_owned()),
        map_embed_url: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn default_footer_settings() -> footer_settings::Model {
    let now = Utc::now().naive_utc();
    footer_settings::Model {
        id: SINGLETON_ID.to_owned(),
        description_nl: Some(
            "Uw betrouwbare partner voor professionele bouwoplossingen in Amsterdam.".to_owned(),
        ),
        description_en: Some(
            "Your trusted partner for professional construction solutions in Amsterdam."
                .to_owned(),
        ),
        copyright_text: Some(
            "© 2024 BouwMeesters Amsterdam BV. Alle rechten voorbehouden.".to_owned(),
        ),
        newsletter_title_nl: Some("Blijf op de hoogte".to_owned()),
        newsletter_title_en: Some("Stay informed".to_owned()),
        show_newsletter: true,
        show_social_links: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn default_statistics_settings() -> statistics_settings::Model {
    let now = Utc::now().naive_utc();
    statistics_settings::Model {
        id: SINGLETON_ID.to_owned(),
        title_nl: Some("Onze cijfers".to_owned()),
        title_en: Some("Our numbers".to_owned()),
        subtitle_nl: None,
        subtitle_en: None,
        is_visible: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn default_team_settings() -> team_settings::Model {
    let now = Utc::now().naive_utc();
    team_settings::Model {
        id: SINGLETON_ID.to_owned(),
        title_nl: Some("Ons Team".to_owned()),
        title_en: Some("Our Team".to_owned()),
        subtitle_nl: Some("De mensen achter BouwMeesters".to_owned()),
        subtitle_en: Some("The people behind BouwMeesters".to_owned()),
        is_visible: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn default_partners_settings() -> partners_settings::Model {
    let now = Utc::now().naive_utc();
    partners_settings::Model {
        id: SINGLETON_ID.to_owned(),
        title_nl: Some("Onze Partners".to_owned()),
        title_en: Some("Our Partners".to_owned()),
        subtitle_nl: None,
        subtitle_en: None,
        is_visible: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn default_initiatives_settings() -> company_initiatives_settings::Model {
    let now = Utc::now().naive_utc();
    company_initiatives_settings::Model {
        id: SINGLETON_ID.to_owned(),
        title_nl: Some("Onze Initiatieven".to_owned()),
        title_en: Some("Our Initiatives".to_owned()),
        subtitle_nl: None,
        subtitle_en: None,
        is_visible: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn default_testimonials_settings() -> testimonials_settings::Model {
    let now = Utc::now().naive_utc();
    testimonials_settings::Model {
        id: SINGLETON_ID.to_owned(),
        title_nl: Some("Wat klanten zeggen".to_owned()),
        title_en: Some("What clients say".to_owned()),
        subtitle_nl: None,
        subtitle_en: None,
        display_count: 3,
        is_visible: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn default_blog_settings() -> blog_settings::Model {
    let now = Utc::now().naive_utc();
    blog_settings::Model {
        id: SINGLETON_ID.to_owned(),
        title_nl: Some("Laatste Nieuws".to_owned()),
        title_en: Some("Latest News".to_owned()),
        subtitle_nl: None,
        subtitle_en: None,
        show_author: true,
        show_reading_time: true,
        is_visible: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn default_email_settings() -> email_settings::Model {
    let now = Utc::now().naive_utc();
    email_settings::Model {
        id: SINGLETON_ID.to_owned(),
        from_name: Some("BouwMeesters Amsterdam".to_owned()),
        from_address: Some("noreply@bouwmeesters.nl".to_owned()),
        notification_address: Some("info@bouwmeesters.nl".to_owned()),
        send_visitor_confirmation: true,
        send_admin_notification: true,
        created_at: now,
        updated_at: now,
    }
}

// Full-row write payloads for the formless singletons. The PUT handlers
// and the seeder both go through these so every column is written
// explicitly.

pub fn about_us_page_row(model: about_us_page::Model) -> about_us_page::ActiveModel {
    about_us_page::ActiveModel {
        id: Set(model.id),
        title_nl: Set(model.title_nl),
        title_en: Set(model.title_en),
        subtitle_nl: Set(model.subtitle_nl),
        subtitle_en: Set(model.subtitle_en),
        story_nl: Set(model.story_nl),
        story_en: Set(model.story_en),
        company_values: Set(model.company_values),
        header_image: Set(model.header_image),
        is_active: Set(model.is_active),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    }
}

pub fn company_details_row(model: company_details::Model) -> company_details::ActiveModel {
    company_details::ActiveModel {
        id: Set(model.id),
        company_name: Set(model.company_name),
        kvk_number: Set(model.kvk_number),
        btw_number: Set(model.btw_number),
        iban: Set(model.iban),
        address: Set(model.address),
        postal_code: Set(model.postal_code),
        city: Set(model.city),
        phone: Set(model.phone),
        email: Set(model.email),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    }
}

pub fn contact_info_row(model: contact_info::Model) -> contact_info::ActiveModel {
    contact_info::ActiveModel {
        id: Set(model.id),
        address: Set(model.address),
        postal_code: Set(model.postal_code),
        city: Set(model.city),
        phone: Set(model.phone),
        email: Set(model.email),
        opening_hours_nl: Set(model.opening_hours_nl),
        opening_hours_en: Set(model.opening_hours_en),
        map_embed_url: Set(model.map_embed_url),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    }
}

pub fn footer_settings_row(model: footer_settings::Model) -> footer_settings::ActiveModel {
    footer_settings::ActiveModel {
        id: Set(model.id),
        description_nl: Set(model.description_nl),
        description_en: Set(model.description_en),
        copyright_text: Set(model.copyright_text),
        newsletter_title_nl: Set(model.newsletter_title_nl),
        newsletter_title_en: Set(model.newsletter_title_en),
        show_newsletter: Set(model.show_newsletter),
        show_social_links: Set(model.show_social_links),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    }
}

pub fn statistics_settings_row(
    model: statistics_settings::Model,
) -> statistics_settings::ActiveModel {
    statistics_settings::ActiveModel {
        id: Set(model.id),
        title_nl: Set(model.title_nl),
        title_en: Set(model.title_en),
        subtitle_nl: Set(model.subtitle_nl),
        subtitle_en: Set(model.subtitle_en),
        is_visible: Set(model.is_visible),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    }
}

pub fn team_settings_row(model: team_settings::Model) -> team_settings::ActiveModel {
    team_settings::ActiveModel {
        id: Set(model.id),
        title_nl: Set(model.title_nl),
        title_en: Set(model.title_en),
        subtitle_nl: Set(model.subtitle_nl),
        subtitle_en: Set(model.subtitle_en),
        is_visible: Set(model.is_visible),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    }
}

pub fn partners_settings_row(model: partners_settings::Model) -> partners_settings::ActiveModel {
    partners_settings::ActiveModel {
        id: Set(model.id),
        title_nl: Set(model.title_nl),
        title_en: Set(model.title_en),
        subtitle_nl: Set(model.subtitle_nl),
        subtitle_en: Set(model.subtitle_en),
        is_visible: Set(model.is_visible),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    }
}

pub fn initiatives_settings_row(
    model: company_initiatives_settings::Model,
) -> company_initiatives_settings::ActiveModel {
    company_initiatives_settings::ActiveModel {
        id: Set(model.id),
        title_nl: Set(model.title_nl),
        title_en: Set(model.title_en),
        subtitle_nl: Set(model.subtitle_nl),
        subtitle_en: Set(model.subtitle_en),
        is_visible: Set(model.is_visible),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    }
}

pub fn testimonials_settings_row(
    model: testimonials_settings::Model,
) -> testimonials_settings::ActiveModel {
    testimonials_settings::ActiveModel {
        id: Set(model.id),
        title_nl: Set(model.title_nl),
        title_en: Set(model.title_en),
        subtitle_nl: Set(model.subtitle_nl),
        subtitle_en: Set(model.subtitle_en),
        display_count: Set(model.display_count),
        is_visible: Set(model.is_visible),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    }
}

pub fn blog_settings_row(model: blog_settings::Model) -> blog_settings::ActiveModel {
    blog_settings::ActiveModel {
        id: Set(model.id),
        title_nl: Set(model.title_nl),
        title_en: Set(model.title_en),
        subtitle_nl: Set(model.subtitle_nl),
        subtitle_en: Set(model.subtitle_en),
        show_author: Set(model.show_author),
        show_reading_time: Set(model.show_reading_time),
        is_visible: Set(model.is_visible),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    }
}

pub fn email_settings_row(model: email_settings::Model) -> email_settings::ActiveModel {
    email_settings::ActiveModel {
        id: Set(model.id),
        from_name: Set(model.from_name),
        from_address: Set(model.from_address),
        notification_address: Set(model.notification_address),
        send_visitor_confirmation: Set(model.send_visitor_confirmation),
        send_admin_notification: Set(model.send_admin_notification),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    }
}

/// The fixed contact form: seven fields, orders 1 through 7, all
/// required and visible. `project_type` is the only select field.
pub fn default_contact_fields() -> Vec<contact_form_settings::ActiveModel> {
    let now = Utc::now().naive_utc();
    let field = |key: &str,
                 label_nl: &str,
                 label_en: &str,
                 placeholder_nl: &str,
                 placeholder_en: &str,
                 field_type: contact_form_settings::FieldType,
                 options: Option<serde_json::Value>,
                 order: i32| {
        contact_form_settings::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            field_key: Set(key.to_owned()),
            label_nl: Set(label_nl.to_owned()),
            label_en: Set(label_en.to_owned()),
            placeholder_nl: Set(Some(placeholder_nl.to_owned())),
            placeholder_en: Set(Some(placeholder_en.to_owned())),
            field_type: Set(field_type),
            options: Set(options),
            validation_rules: Set(None),
            is_required: Set(true),
            is_visible: Set(true),
            order: Set(order),
            created_at: Set(now),
            updated_at: Set(now),
        }
    };

    let project_types = serde_json::json!([
        "Woningbouw",
        "Commerciële bouw",
        "Renovatie",
        "Interieurdesign",
        "Advies",
        "Overig"
    ]);

    vec![
        field(
            "first_name",
            "Voornaam",
            "First Name",
            "Voer uw voornaam in",
            "Enter your first name",
            contact_form_settings::FieldType::Text,
            None,
            1,
        ),
        field(
            "last_name",
            "Achternaam",
            "Last Name",
            "Voer uw achternaam in",
            "Enter your last name",
            contact_form_settings::FieldType::Text,
            None,
            2,
        ),
        field(
            "email",
            "E-mailadres",
            "Email Address",
            "Voer uw e-mailadres in",
            "Enter your email address",
            contact_form_settings::FieldType::Email,
            None,
            3,
        ),
        field(
            "phone",
            "Telefoonnummer",
            "Phone Number",
            "Voer uw telefoonnummer in",
            "Enter your phone number",
            contact_form_settings::FieldType::Tel,
            None,
            4,
        ),
        field(
            "company",
            "Bedrijf",
            "Company",
            "Voer uw bedrijfsnaam in",
            "Enter your company name",
            contact_form_settings::FieldType::Text,
            None,
            5,
        ),
        field(
            "project_type",
            "Projecttype",
            "Project Type",
            "Selecteer een type",
            "Select a type",
            contact_form_settings::FieldType::Select,
            Some(project_types),
            6,
        ),
        field(
            "message",
            "Projectbeschrijving",
            "Project Description",
            "Beschrijf uw project...",
            "Describe your project...",
            contact_form_settings::FieldType::Textarea,
            None,
            7,
        ),
    ]
}

/// One navigation row per content section, in page order.
pub fn default_sections() -> Vec<section_settings::ActiveModel> {
    let now = Utc::now().naive_utc();
    ContentSection::ALL
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let (name_nl, name_en) = section_names(*section);
            let (in_header, in_footer) = section_navigation(*section);
            let route = if *section == ContentSection::Hero {
                "/".to_owned()
            } else {
                format!("/#{}", section.key())
            };
            section_settings::ActiveModel {
                id: Set(Uuid::new_v4().to_string()),
                section_key: Set(section.key().to_owned()),
                name_nl: Set(Some(name_nl.to_owned())),
                name_en: Set(Some(name_en.to_owned())),
                is_visible: Set(true),
                show_in_header: Set(in_header),
                show_in_footer: Set(in_footer),
                order: Set(index as i32 + 1),
                route: Set(Some(route)),
                created_at: Set(now),
                updated_at: Set(now),
            }
        })
        .collect()
}

fn section_names(section: ContentSection) -> (&'static str, &'static str) {
    match section {
        ContentSection::Hero => ("Home", "Home"),
        ContentSection::Statistics => ("Cijfers", "Numbers"),
        ContentSection::About => ("Over ons", "About us"),
        ContentSection::Services => ("Diensten", "Services"),
        ContentSection::Projects => ("Projecten", "Projects"),
        ContentSection::Testimonials => ("Referenties", "Testimonials"),
        ContentSection::Blog => ("Blog", "Blog"),
        ContentSection::Contact => ("Contact", "Contact"),
    }
}

// In-page sections without their own anchor in the site chrome stay out
// of the header and footer menus.
fn section_navigation(section: ContentSection) -> (bool, bool) {
    match section {
        ContentSection::Hero | ContentSection::Statistics | ContentSection::Testimonials => {
            (false, false)
        }
        _ => (true, true),
    }
}

pub fn default_statistics() -> Vec<statistics::ActiveModel> {
    let now = Utc::now().naive_utc();
    let row = |label_nl: &str, label_en: &str, value: &str, icon: &str, order: i32| {
        statistics::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            label_nl: Set(label_nl.to_owned()),
            label_en: Set(label_en.to_owned()),
            value: Set(value.to_owned()),
            suffix: Set(Some("+".to_owned())),
            icon: Set(Some(icon.to_owned())),
            order: Set(order),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
    };
    vec![
        row("Voltooide Projecten", "Completed Projects", "500", "building", 1),
        row("Tevreden Klanten", "Happy Clients", "350", "users", 2),
        row("Jaren Ervaring", "Years Experience", "20", "award", 3),
        row("Team Leden", "Team Members", "50", "team", 4),
    ]
}

pub fn default_services() -> Vec<services::ActiveModel> {
    let now = Utc::now().naive_utc();
    let row = |title_nl: &str,
               title_en: &str,
               description_nl: &str,
               description_en: &str,
               icon: &str,
               order: i32| {
        services::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            title_nl: Set(title_nl.to_owned()),
            title_en: Set(title_en.to_owned()),
            description_nl: Set(description_nl.to_owned()),
            description_en: Set(description_en.to_owned()),
            icon: Set(Some(icon.to_owned())),
            image: Set(None),
            order: Set(order),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
    };
    vec![
        row(
            "Nieuwbouw",
            "New Construction",
            "Complete nieuwbouwprojecten van ontwerp tot oplevering",
            "Complete new construction projects from design to delivery",
            "building",
            1,
        ),
        row(
            "Renovatie",
            "Renovation",
            "Professionele renovatie en verbouwing van woningen en bedrijfspanden",
            "Professional renovation and remodeling of homes and commercial buildings",
            "wrench",
            2,
        ),
        row(
            "Onderhoud",
            "Maintenance",
            "Regelmatig onderhoud en reparaties voor uw gebouw",
            "Regular maintenance and repairs for your building",
            "tools",
            3,
        ),
    ]
}

pub fn default_site_settings() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        ("site_name", "BouwMeesters Amsterdam", "general"),
        ("site_tagline", "Uw Partner in Bouw", "general"),
        ("logo_url", "/logo.png", "branding"),
    ]
}

/// Inserts every default the site needs to render, skipping anything
/// that already exists. Returns the number of rows inserted.
pub async fn seed_defaults(db: &DatabaseConnection) -> Result<u64, DbErr> {
    use crate::editor::{AboutForm, HeroForm};

    let mut inserted: u64 = 0;

    if hero_content::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await?
        .is_none()
    {
        let row = HeroForm::from_model(&default_hero()).into_model(None);
        hero_content::Entity::insert(row).exec(db).await?;
        inserted += 1;
    }

    if about_content::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await?
        .is_none()
    {
        let row = AboutForm::from_model(&default_about()).into_model(None);
        about_content::Entity::insert(row).exec(db).await?;
        inserted += 1;
    }

    if about_us_page::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await?
        .is_none()
    {
        about_us_page::Entity::insert(about_us_page_row(default_about_us_page()))
            .exec(db)
            .await?;
        inserted += 1;
    }

    if company_details::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await?
        .is_none()
    {
        company_details::Entity::insert(company_details_row(default_company_details()))
            .exec(db)
            .await?;
        inserted += 1;
    }

    if contact_info::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await?
        .is_none()
    {
        contact_info::Entity::insert(contact_info_row(default_contact_info()))
            .exec(db)
            .await?;
        inserted += 1;
    }

    if footer_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await?
        .is_none()
    {
        footer_settings::Entity::insert(footer_settings_row(default_footer_settings()))
            .exec(db)
            .await?;
        inserted += 1;
    }

    if statistics_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await?
        .is_none()
    {
        statistics_settings::Entity::insert(statistics_settings_row(default_statistics_settings()))
            .exec(db)
            .await?;
        inserted += 1;
    }

    if team_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await?
        .is_none()
    {
        team_settings::Entity::insert(team_settings_row(default_team_settings()))
            .exec(db)
            .await?;
        inserted += 1;
    }

    if partners_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await?
        .is_none()
    {
        partners_settings::Entity::insert(partners_settings_row(default_partners_settings()))
            .exec(db)
            .await?;
        inserted += 1;
    }

    if company_initiatives_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await?
        .is_none()
    {
        company_initiatives_settings::Entity::insert(initiatives_settings_row(
            default_initiatives_settings(),
        ))
        .exec(db)
        .await?;
        inserted += 1;
    }

    if testimonials_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await?
        .is_none()
    {
        testimonials_settings::Entity::insert(testimonials_settings_row(
            default_testimonials_settings(),
        ))
        .exec(db)
        .await?;
        inserted += 1;
    }

    if blog_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await?
        .is_none()
    {
        blog_settings::Entity::insert(blog_settings_row(default_blog_settings()))
            .exec(db)
            .await?;
        inserted += 1;
    }

    if email_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await?
        .is_none()
    {
        email_settings::Entity::insert(email_settings_row(default_email_settings()))
            .exec(db)
            .await?;
        inserted += 1;
    }

    if section_settings::Entity::find().count(db).await? == 0 {
        let sections = default_sections();
        inserted += sections.len() as u64;
        section_settings::Entity::insert_many(sections).exec(db).await?;
        log::info!("Seeded section settings");
    }

    if contact_form_settings::Entity::find().count(db).await? == 0 {
        let fields = default_contact_fields();
        inserted += fields.len() as u64;
        contact_form_settings::Entity::insert_many(fields).exec(db).await?;
        log::info!("Seeded contact form fields");
    }

    if statistics::Entity::find().count(db).await? == 0 {
        let rows = default_statistics();
        inserted += rows.len() as u64;
        statistics::Entity::insert_many(rows).exec(db).await?;
        log::info!("Seeded statistics");
    }

    if services::Entity::find().count(db).await? == 0 {
        let rows = default_services();
        inserted += rows.len() as u64;
        services::Entity::insert_many(rows).exec(db).await?;
        log::info!("Seeded services");
    }

    let now = Utc::now().naive_utc();
    for (key, value, category) in default_site_settings() {
        let exists = site_settings::Entity::find()
            .filter(site_settings::Column::Key.eq(key))
            .one(db)
            .await?
            .is_some();
        if !exists {
            site_settings::Entity::insert(site_settings::ActiveModel {
                id: Set(Uuid::new_v4().to_string()),
                key: Set(key.to_owned()),
                value: Set(value.to_owned()),
                category: Set(Some(category.to_owned())),
                created_at: Set(now),
                updated_at: Set(now),
            })
            .exec(db)
            .await?;
            inserted += 1;
        }
    }

    Ok(inserted)
}

/// Creates or refreshes an admin account. The password arrives already
/// hashed so this module never touches plain credentials.
pub async fn create_admin(
    db: &DatabaseConnection,
    email: &str,
    password_hash: String,
    first_name: Option<String>,
    last_name: Option<String>,
) -> Result<users::Model, DbErr> {
    let email = email.trim().to_lowercase();
    let now = Utc::now().naive_utc();

    let existing = users::Entity::find()
        .filter(users::Column::Email.eq(email.as_str()))
        .one(db)
        .await?;

    match existing {
        Some(user) => {
            let mut active: users::ActiveModel = user.into();
            active.password = Set(password_hash);
            active.role = Set("admin".to_owned());
            active.is_active = Set(true);
            active.updated_at = Set(now);
            active.update(db).await
        }
        None => {
            let active = users::ActiveModel {
                id: Set(Uuid::new_v4().to_string()),
                email: Set(email),
                password: Set(password_hash),
                first_name: Set(first_name),
                last_name: Set(last_name),
                role: Set("admin".to_owned()),
                is_active: Set(true),
                reset_token: Set(None),
                reset_token_expiry: Set(None),
                last_login_at: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            };
            active.insert(db).await
        }
    }
}

/// Removes services sharing a Dutch title, keeping the oldest row of
/// each group. Returns the number of rows deleted.
pub async fn clean_duplicate_services(db: &DatabaseConnection) -> Result<u64, DbErr> {
    let rows = services::Entity::find()
        .order_by_asc(services::Column::CreatedAt)
        .all(db)
        .await?;

    let mut seen: Vec<String> = Vec::new();
    let mut deleted: u64 = 0;
    for row in rows {
        if seen.contains(&row.title_nl) {
            services::Entity::delete_by_id(row.id).exec(db).await?;
            deleted += 1;
        } else {
            seen.push(row.title_nl.clone());
        }
    }
    Ok(deleted)
}

/// Deletes backups whose advisory `expires_at` has passed. Nothing else
/// in the system ever removes backups.
pub async fn purge_expired_backups(db: &DatabaseConnection) -> Result<u64, DbErr> {
    let result = content_backups::Entity::delete_many()
        .filter(content_backups::Column::ExpiresAt.lt(Utc::now().naive_utc()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// Deletes expired rows from the legacy server-side session store. The
/// admin cookie never reads this table, so nothing expires them online.
pub async fn purge_expired_sessions(db: &DatabaseConnection) -> Result<u64, DbErr> {
    let result = sessions::Entity::delete_many()
        .filter(sessions::Column::Expire.lt(Utc::now().naive_utc()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
