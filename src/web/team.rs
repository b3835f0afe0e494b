//! Team members and the team section settings.

use actix_web::{delete, error, get, post, put, web, Error, HttpResponse};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::cache;
use crate::constants::SINGLETON_ID;
use crate::content::lists;
use crate::db::get_db_pool;
use crate::middleware::AdminCtx;
use crate::orm::{team_members, team_settings};
use crate::seed_data;

pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_team_members)
        .service(view_team_settings)
        .service(admin_list_team_members)
        .service(create_team_member)
        .service(update_team_member)
        .service(delete_team_member)
        .service(admin_view_team_settings)
        .service(update_team_settings);
}

const CACHE_TEAM_MEMBERS: &str = "team-members";
const CACHE_TEAM_SETTINGS: &str = "team-settings";

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase", default)]
struct TeamMemberForm {
    #[validate(length(min = 1))]
    name: String,
    #[validate(length(min = 1))]
    role_nl: String,
    #[validate(length(min = 1))]
    role_en: String,
    bio_nl: Option<String>,
    bio_en: Option<String>,
    image: Option<String>,
    #[validate(email)]
    email: Option<String>,
    phone: Option<String>,
    linkedin_url: Option<String>,
    specialties: Vec<String>,
    // Semi-structured records, stored as submitted. The admin editor only
    // manages the specialties list.
    skills: Option<Value>,
    certifications: Option<Value>,
    achievements: Option<Value>,
    order: i32,
    is_active: bool,
}

impl Default for TeamMemberForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            role_nl: String::new(),
            role_en: String::new(),
            bio_nl: None,
            bio_en: None,
            image: None,
            email: None,
            phone: None,
            linkedin_url: None,
            specialties: Vec::new(),
            skills: None,
            certifications: None,
            achievements: None,
            order: 0,
            is_active: true,
        }
    }
}

fn list_column(items: &[String]) -> Option<sea_orm::entity::prelude::Json> {
    if items.is_empty() {
        None
    } else {
        Some(lists::to_json(items))
    }
}

impl TeamMemberForm {
    fn from_model(member: &team_members::Model) -> Self {
        Self {
            name: member.name.clone(),
            role_nl: member.role_nl.clone(),
            role_en: member.role_en.clone(),
            bio_nl: member.bio_nl.clone(),
            bio_en: member.bio_en.clone(),
            image: member.image.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
            linkedin_url: member.linkedin_url.clone(),
            specialties: lists::strings(member.specialties.as_ref()),
            skills: member.skills.clone(),
            certifications: member.certifications.clone(),
            achievements: member.achievements.clone(),
            order: member.order,
            is_active: member.is_active,
        }
    }

    fn create_model(self) -> team_members::ActiveModel {
        let now = Utc::now().naive_utc();
        team_members::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(self.name.trim().to_owned()),
            role_nl: Set(self.role_nl.trim().to_owned()),
            role_en: Set(self.role_en.trim().to_owned()),
            bio_nl: Set(self.bio_nl),
            bio_en: Set(self.bio_en),
            image: Set(self.image),
            email: Set(self.email),
            phone: Set(self.phone),
            linkedin_url: Set(self.linkedin_url),
            specialties: Set(list_column(&self.specialties)),
            skills: Set(self.skills),
            certifications: Set(self.certifications),
            achievements: Set(self.achievements),
            order: Set(self.order),
            is_active: Set(self.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn update_model(self, existing: &team_members::Model) -> team_members::ActiveModel {
        team_members::ActiveModel {
            id: Set(existing.id.clone()),
            name: Set(self.name.trim().to_owned()),
            role_nl: Set(self.role_nl.trim().to_owned()),
            role_en: Set(self.role_en.trim().to_owned()),
            bio_nl: Set(self.bio_nl),
            bio_en: Set(self.bio_en),
            image: Set(self.image),
            email: Set(self.email),
            phone: Set(self.phone),
            linkedin_url: Set(self.linkedin_url),
            specialties: Set(list_column(&self.specialties)),
            skills: Set(self.skills),
            certifications: Set(self.certifications),
            achievements: Set(self.achievements),
            order: Set(self.order),
            is_active: Set(self.is_active),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
    }
}

#[get("/api/team-members")]
async fn view_team_members() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_TEAM_MEMBERS) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let rows = team_members::Entity::find()
        .filter(team_members::Column::IsActive.eq(true))
        .order_by_asc(team_members::Column::Order)
        .order_by_asc(team_members::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load team members: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;

    let payload = serde_json::to_value(&rows).map_err(|e| {
        log::error!("Failed to serialize team members: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_TEAM_MEMBERS, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/team-settings")]
async fn view_team_settings() -> Result<HttpResponse, Error> {
    if let Some(cached) = cache::get(CACHE_TEAM_SETTINGS) {
        return Ok(HttpResponse::Ok().json(cached));
    }

    let settings = team_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load team settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_team_settings);

    let payload = serde_json::to_value(&settings).map_err(|e| {
        log::error!("Failed to serialize team settings: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    cache::insert(CACHE_TEAM_SETTINGS, payload.clone());
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/api/admin/team-members")]
async fn admin_list_team_members(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let rows = team_members::Entity::find()
        .order_by_asc(team_members::Column::Order)
        .order_by_asc(team_members::Column::CreatedAt)
        .all(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load team members: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    Ok(HttpResponse::Ok().json(rows))
}

#[post("/api/admin/team-members")]
async fn create_team_member(
    ctx: AdminCtx,
    form: web::Json<TeamMemberForm>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let form = form.into_inner();
    form.validate().map_err(error::ErrorBadRequest)?;

    let created = form.create_model().insert(get_db_pool()).await.map_err(|e| {
        log::error!("Failed to create team member: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_TEAM_MEMBERS);
    Ok(HttpResponse::Ok().json(created))
}

#[put("/api/admin/team-members/{id}")]
async fn update_team_member(
    ctx: AdminCtx,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = team_members::Entity::find_by_id(path.into_inner())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load team member: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .ok_or_else(|| error::ErrorNotFound("Team member not found"))?;

    let mut base = serde_json::to_value(TeamMemberForm::from_model(&existing)).map_err(|e| {
        log::error!("Failed to serialize team member form: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let form: TeamMemberForm = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed team member payload: {}", e)))?;
    form.validate().map_err(error::ErrorBadRequest)?;

    let updated = form.update_model(&existing).update(db).await.map_err(|e| {
        log::error!("Failed to update team member: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_TEAM_MEMBERS);
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/api/admin/team-members/{id}")]
async fn delete_team_member(ctx: AdminCtx, path: web::Path<String>) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let result = team_members::Entity::delete_by_id(path.into_inner())
        .exec(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to delete team member: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    if result.rows_affected == 0 {
        return Err(error::ErrorNotFound("Team member not found"));
    }

    cache::invalidate(CACHE_TEAM_MEMBERS);
    Ok(HttpResponse::NoContent().finish())
}

#[get("/api/admin/team-settings")]
async fn admin_view_team_settings(ctx: AdminCtx) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;

    let settings = team_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(get_db_pool())
        .await
        .map_err(|e| {
            log::error!("Failed to load team settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?
        .unwrap_or_else(seed_data::default_team_settings);
    Ok(HttpResponse::Ok().json(settings))
}

#[put("/api/admin/team-settings")]
async fn update_team_settings(
    ctx: AdminCtx,
    payload: web::Json<Value>,
) -> Result<HttpResponse, Error> {
    ctx.require_admin()?;
    let db = get_db_pool();

    let existing = team_settings::Entity::find_by_id(SINGLETON_ID.to_owned())
        .one(db)
        .await
        .map_err(|e| {
            log::error!("Failed to load team settings: {}", e);
            error::ErrorInternalServerError("Database error")
        })?;
    let exists = existing.is_some();

    let base_model = existing.unwrap_or_else(seed_data::default_team_settings);
    let mut base = serde_json::to_value(&base_model).map_err(|e| {
        log::error!("Failed to serialize team settings: {}", e);
        error::ErrorInternalServerError("Serialization error")
    })?;
    super::merge_patch(&mut base, payload.into_inner());
    let mut merged: team_settings::Model = serde_json::from_value(base)
        .map_err(|e| error::ErrorBadRequest(format!("Malformed team settings: {}", e)))?;
    merged.id = SINGLETON_ID.to_owned();
    merged.updated_at = Utc::now().naive_utc();

    let row = seed_data::team_settings_row(merged);
    let saved = if exists {
        row.update(db).await
    } else {
        row.insert(db).await
    }
    .map_err(|e| {
        log::error!("Failed to store team settings: {}", e);
        error::ErrorInternalServerError("Database error")
    })?;

    cache::invalidate(CACHE_TEAM_SETTINGS);
    Ok(HttpResponse::Ok().json(saved))
}
