use crate::entities::subject;
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

pub struct SubjectRepository;

impl SubjectRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn list_active(&self) -> Result<Vec<subject::Model>> {
        let db = self.get_connection();
        let subjects = subject::Entity::find()
            .filter(subject::Column::IsActive.eq(true))
            .order_by_asc(subject::Column::SubjectName)
            .all(db)
            .await?;
        Ok(subjects)
    }

    pub async fn find_by_code(&self, subject_code: &str) -> Result<Option<subject::Model>> {
        let db = self.get_connection();
        let found = subject::Entity::find()
            .filter(subject::Column::SubjectCode.eq(subject_code))
            .one(db)
            .await?;
        Ok(found)
    }

    /// Seeds the subject catalogue used by the setup flow; existing codes
    /// are left untouched.
    pub async fn ensure_sample_subjects(&self) -> Result<()> {
        let db = self.get_connection();

        let samples = [
            ("MATH", "Mathematics", 3),
            ("SCI", "Science", 3),
            ("ENG", "English", 3),
            ("SSC", "Social Science", 3),
            ("HIN", "Hindi", 3),
        ];

        for (code, name, credit_hours) in samples {
            if self.find_by_code(code).await?.is_some() {
                continue;
            }

            let sample = subject::ActiveModel {
                subject_code: Set(code.to_string()),
                subject_name: Set(name.to_string()),
                credit_hours: Set(credit_hours),
                is_active: Set(true),
                ..Default::default()
            };
            sample.insert(db).await?;
        }

        Ok(())
    }
}
