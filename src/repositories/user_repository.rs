use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::user;
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    /// Login lookup: only active accounts take part in authentication.
    pub async fn find_active_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        let db = self.get_connection();
        let account = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .filter(user::Column::IsActive.eq(true))
            .one(db)
            .await?;
        Ok(account)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        let db = self.get_connection();
        let account = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await?;
        Ok(account)
    }

    /// Create-or-reset for the admin account, mirroring the one-time setup
    /// flow: an existing account only gets its password hash refreshed.
    pub async fn upsert_admin(
        &self,
        username: &str,
        password_hash: &str,
        email: &str,
        full_name: &str,
    ) -> Result<user::Model> {
        let db = self.get_connection();

        match self.find_by_username(username).await? {
            Some(existing) => {
                let mut account: user::ActiveModel = existing.into();
                account.password_hash = Set(password_hash.to_string());
                let updated = account.update(db).await?;
                Ok(updated)
            }
            None => {
                let account = user::ActiveModel {
                    username: Set(username.to_string()),
                    password_hash: Set(password_hash.to_string()),
                    email: Set(email.to_string()),
                    full_name: Set(full_name.to_string()),
                    role: Set(RoleEnum::Admin),
                    is_active: Set(true),
                    ..Default::default()
                };
                let inserted = account.insert(db).await?;
                Ok(inserted)
            }
        }
    }
}
