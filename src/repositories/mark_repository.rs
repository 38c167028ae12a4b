use crate::entities::sea_orm_active_enums::StudentStatus;
use crate::entities::{mark, student, subject};
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};
use serde::Serialize;
use utoipa::ToSchema;

/// One marksheet line: an active student and, when present, one of their
/// exam results. Students without marks keep a line with empty mark fields
/// (LEFT JOIN semantics of the marksheet page).
#[derive(Debug, Clone, FromQueryResult, Serialize, ToSchema)]
pub struct MarksheetRow {
    pub student_id: i32,
    pub admission_number: String,
    pub first_name: String,
    pub last_name: String,
    pub roll_number: String,
    pub class_id: Option<i32>,
    pub section: Option<String>,
    pub mark_id: Option<i32>,
    pub subject_id: Option<i32>,
    pub exam_type: Option<String>,
    pub marks_obtained: Option<f64>,
    pub max_marks: Option<f64>,
    pub exam_date: Option<NaiveDate>,
    pub academic_year: Option<String>,
}

/// One student's exam result with its subject resolved (when the subject
/// still exists).
#[derive(Debug, Clone, FromQueryResult, Serialize, ToSchema)]
pub struct StudentMarkRow {
    pub mark_id: i32,
    pub subject_id: Option<i32>,
    pub subject_name: Option<String>,
    pub subject_code: Option<String>,
    pub exam_type: String,
    pub marks_obtained: f64,
    pub max_marks: f64,
    pub exam_date: NaiveDate,
    pub academic_year: String,
}

impl From<StudentMarkRow> for crate::grading::MarkEntry {
    fn from(row: StudentMarkRow) -> Self {
        Self {
            mark_id: row.mark_id,
            subject_name: row.subject_name,
            subject_code: row.subject_code,
            exam_type: row.exam_type,
            marks_obtained: row.marks_obtained,
            max_marks: row.max_marks,
            exam_date: row.exam_date,
            academic_year: row.academic_year,
        }
    }
}

/// Latest mark entries joined with the student's name, for the dashboard.
#[derive(Debug, Clone, FromQueryResult, Serialize, ToSchema)]
pub struct RecentMarkRow {
    pub mark_id: i32,
    pub exam_type: String,
    pub marks_obtained: f64,
    pub max_marks: f64,
    pub exam_date: NaiveDate,
    pub academic_year: String,
    pub created_at: NaiveDateTime,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Default, Clone)]
pub struct MarksheetFilter {
    pub academic_year: Option<String>,
    pub exam_type: Option<String>,
    pub student_id: Option<i32>,
}

pub struct MarkRepository;

impl MarkRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, mark_id: i32) -> Result<Option<mark::Model>> {
        let db = self.get_connection();
        let found = mark::Entity::find_by_id(mark_id).one(db).await?;
        Ok(found)
    }

    pub async fn marksheet(&self, filter: MarksheetFilter) -> Result<Vec<MarksheetRow>> {
        let db = self.get_connection();

        let mut query = student::Entity::find()
            .select_only()
            .column_as(student::Column::Id, "student_id")
            .column(student::Column::AdmissionNumber)
            .column(student::Column::FirstName)
            .column(student::Column::LastName)
            .column(student::Column::RollNumber)
            .column(student::Column::ClassId)
            .column(student::Column::Section)
            .column_as(mark::Column::Id, "mark_id")
            .column(mark::Column::SubjectId)
            .column(mark::Column::ExamType)
            .column(mark::Column::MarksObtained)
            .column(mark::Column::MaxMarks)
            .column(mark::Column::ExamDate)
            .column_as(mark::Column::AcademicYear, "academic_year")
            .join(JoinType::LeftJoin, student::Relation::Marks.def())
            .filter(student::Column::Status.eq(StudentStatus::Active));

        if let Some(academic_year) = filter.academic_year {
            query = query.filter(mark::Column::AcademicYear.eq(academic_year));
        }

        if let Some(exam_type) = filter.exam_type {
            query = query.filter(mark::Column::ExamType.eq(exam_type));
        }

        if let Some(student_id) = filter.student_id {
            query = query.filter(student::Column::Id.eq(student_id));
        }

        let rows = query
            .order_by_asc(student::Column::LastName)
            .order_by_asc(student::Column::FirstName)
            .order_by_desc(mark::Column::ExamDate)
            .into_model::<MarksheetRow>()
            .all(db)
            .await?;
        Ok(rows)
    }

    fn student_marks_select() -> sea_orm::Select<mark::Entity> {
        mark::Entity::find()
            .select_only()
            .column_as(mark::Column::Id, "mark_id")
            .column(mark::Column::SubjectId)
            .column(subject::Column::SubjectName)
            .column(subject::Column::SubjectCode)
            .column(mark::Column::ExamType)
            .column(mark::Column::MarksObtained)
            .column(mark::Column::MaxMarks)
            .column(mark::Column::ExamDate)
            .column(mark::Column::AcademicYear)
            .join(JoinType::LeftJoin, mark::Relation::Subject.def())
    }

    /// All marks of one student, newest exam first (student details page).
    pub async fn list_for_student(&self, student_id: i32) -> Result<Vec<StudentMarkRow>> {
        let db = self.get_connection();
        let rows = Self::student_marks_select()
            .filter(mark::Column::StudentId.eq(student_id))
            .order_by_desc(mark::Column::ExamDate)
            .into_model::<StudentMarkRow>()
            .all(db)
            .await?;
        Ok(rows)
    }

    /// Report-card input: one student, one academic year, ordered by
    /// subject name then exam type — the order the aggregation preserves.
    pub async fn list_for_report(
        &self,
        student_id: i32,
        academic_year: &str,
    ) -> Result<Vec<StudentMarkRow>> {
        let db = self.get_connection();
        let rows = Self::student_marks_select()
            .filter(mark::Column::StudentId.eq(student_id))
            .filter(mark::Column::AcademicYear.eq(academic_year))
            .order_by_asc(subject::Column::SubjectName)
            .order_by_asc(mark::Column::ExamType)
            .into_model::<StudentMarkRow>()
            .all(db)
            .await?;
        Ok(rows)
    }

    pub async fn insert(&self, data: mark::ActiveModel) -> Result<mark::Model> {
        let db = self.get_connection();
        let inserted = data.insert(db).await?;
        Ok(inserted)
    }

    pub async fn update(&self, data: mark::ActiveModel) -> Result<mark::Model> {
        let db = self.get_connection();
        let updated = data.update(db).await?;
        Ok(updated)
    }

    pub async fn delete_by_id(&self, mark_id: i32) -> Result<u64> {
        let db = self.get_connection();
        let result = mark::Entity::delete_by_id(mark_id).exec(db).await?;
        Ok(result.rows_affected)
    }

    pub async fn count_all(&self) -> Result<u64> {
        let db = self.get_connection();
        let count = mark::Entity::find().count(db).await?;
        Ok(count)
    }

    pub async fn recent_with_student(&self, limit: u64) -> Result<Vec<RecentMarkRow>> {
        let db = self.get_connection();
        let rows = mark::Entity::find()
            .select_only()
            .column_as(mark::Column::Id, "mark_id")
            .column(mark::Column::ExamType)
            .column(mark::Column::MarksObtained)
            .column(mark::Column::MaxMarks)
            .column(mark::Column::ExamDate)
            .column(mark::Column::AcademicYear)
            .column_as(mark::Column::CreatedAt, "created_at")
            .column(student::Column::FirstName)
            .column(student::Column::LastName)
            .join(JoinType::InnerJoin, mark::Relation::Student.def())
            .order_by_desc(mark::Column::CreatedAt)
            .limit(limit)
            .into_model::<RecentMarkRow>()
            .all(db)
            .await?;
        Ok(rows)
    }
}
