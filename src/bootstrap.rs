use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::config::APP_CONFIG;
use crate::entities::{sea_orm_active_enums::RoleEnum, user};
use crate::utils::email::normalize_email;

/// Seeds the configured admin account on startup, once.
pub async fn initialize_admin_user(db: &DatabaseConnection) -> Result<()> {
    let admin_email = normalize_email(&APP_CONFIG.admin_email);
    let default_password: &str = &APP_CONFIG.admin_password;

    let existing_admin = user::Entity::find()
        .filter(user::Column::Email.eq(admin_email.as_str()))
        .one(db)
        .await
        .context("Failed to check existing admin")?;

    if existing_admin.is_some() {
        tracing::info!("Admin user already exists, skipping initialization");
        return Ok(());
    }

    tracing::info!("Creating default admin user...");

    let hashed_password = bcrypt::hash(default_password, bcrypt::DEFAULT_COST)
        .context("Failed to hash admin password")?;

    let now = Utc::now().naive_utc();

    let admin_user = user::ActiveModel {
        email: Set(admin_email.clone()),
        first_name: Set("System".to_string()),
        last_name: Set("Administrator".to_string()),
        password: Set(hashed_password),
        role: Set(RoleEnum::Admin),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    admin_user
        .insert(db)
        .await
        .context("Failed to insert admin user")?;

    tracing::info!(email = %admin_email, "Default admin user created");

    Ok(())
}
