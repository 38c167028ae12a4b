use crate::entities::sea_orm_active_enums::StudentStatus;
use crate::entities::student;
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Active-roster head count per class/section, for the dashboard.
#[derive(Debug, Clone, FromQueryResult, Serialize, ToSchema)]
pub struct ClassSectionCount {
    pub class_id: Option<i32>,
    pub section: Option<String>,
    pub count: i64,
}

pub struct StudentRepository;

impl StudentRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, student_id: i32) -> Result<Option<student::Model>> {
        let db = self.get_connection();
        let found = student::Entity::find_by_id(student_id).one(db).await?;
        Ok(found)
    }

    /// Roster listing with the search/status/class filters of the roster
    /// page, newest first.
    pub async fn search(
        &self,
        search: Option<String>,
        status: Option<StudentStatus>,
        class_id: Option<i32>,
    ) -> Result<Vec<student::Model>> {
        let db = self.get_connection();
        let mut query = student::Entity::find();

        if let Some(term) = search {
            query = query.filter(
                student::Column::FirstName
                    .contains(&term)
                    .or(student::Column::LastName.contains(&term))
                    .or(student::Column::AdmissionNumber.contains(&term))
                    .or(student::Column::RollNumber.contains(&term)),
            );
        }

        if let Some(status) = status {
            query = query.filter(student::Column::Status.eq(status));
        }

        if let Some(class_id) = class_id {
            query = query.filter(student::Column::ClassId.eq(class_id));
        }

        let students = query
            .order_by_desc(student::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(students)
    }

    /// Pick-list for the marks forms: active students ordered by last name.
    pub async fn list_active(&self) -> Result<Vec<student::Model>> {
        let db = self.get_connection();
        let students = student::Entity::find()
            .filter(student::Column::Status.eq(StudentStatus::Active))
            .order_by_asc(student::Column::LastName)
            .all(db)
            .await?;
        Ok(students)
    }

    pub async fn insert(&self, data: student::ActiveModel) -> Result<student::Model> {
        let db = self.get_connection();
        let inserted = data.insert(db).await?;
        Ok(inserted)
    }

    pub async fn update(&self, data: student::ActiveModel) -> Result<student::Model> {
        let db = self.get_connection();
        let updated = data.update(db).await?;
        Ok(updated)
    }

    pub async fn delete_by_id(&self, student_id: i32) -> Result<u64> {
        let db = self.get_connection();
        let result = student::Entity::delete_by_id(student_id).exec(db).await?;
        Ok(result.rows_affected)
    }

    pub async fn count_active(&self) -> Result<u64> {
        let db = self.get_connection();
        let count = student::Entity::find()
            .filter(student::Column::Status.eq(StudentStatus::Active))
            .count(db)
            .await?;
        Ok(count)
    }

    pub async fn recent(&self, limit: u64) -> Result<Vec<student::Model>> {
        let db = self.get_connection();
        let students = student::Entity::find()
            .order_by_desc(student::Column::CreatedAt)
            .limit(limit)
            .all(db)
            .await?;
        Ok(students)
    }

    pub async fn count_active_by_class_section(&self) -> Result<Vec<ClassSectionCount>> {
        let db = self.get_connection();
        let counts = student::Entity::find()
            .select_only()
            .column(student::Column::ClassId)
            .column(student::Column::Section)
            .column_as(student::Column::Id.count(), "count")
            .filter(student::Column::Status.eq(StudentStatus::Active))
            .group_by(student::Column::ClassId)
            .group_by(student::Column::Section)
            .into_model::<ClassSectionCount>()
            .all(db)
            .await?;
        Ok(counts)
    }
}
