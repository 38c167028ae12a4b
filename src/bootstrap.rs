use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::config::APP_CONFIG;
use crate::entities::{sea_orm_active_enums::RoleEnum, user};
use crate::repositories::SubjectRepository;

pub async fn initialize_admin_user(db: &DatabaseConnection) -> Result<()> {
    let admin_username: &str = &APP_CONFIG.admin_username;
    let default_password: &str = &APP_CONFIG.admin_password;

    let existing_admin = user::Entity::find()
        .filter(user::Column::Username.eq(admin_username))
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

    let admin_user = user::ActiveModel {
        username: Set(admin_username.to_string()),
        password_hash: Set(hashed_password),
        email: Set(APP_CONFIG.admin_email.clone()),
        full_name: Set("System Administrator".to_string()),
        role: Set(RoleEnum::Admin),
        is_active: Set(true),
        ..Default::default()
    };

    admin_user
        .insert(db)
        .await
        .context("Failed to insert admin user")?;

    tracing::info!("✅ Admin user created successfully!");
    tracing::info!("  Username: {}", admin_username);
    tracing::info!("  Password: {}", default_password);
    tracing::warn!("⚠️  Please change the default password after first login!");

    Ok(())
}

pub async fn initialize_sample_subjects() -> Result<()> {
    let subject_repo = SubjectRepository::new();
    subject_repo
        .ensure_sample_subjects()
        .await
        .context("Failed to seed sample subjects")?;

    tracing::info!("Sample subjects verified");
    Ok(())
}
