use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::student;
use crate::redis_service::FlashMessage;
use crate::repositories::{ClassSectionCount, RecentMarkRow};

#[derive(Debug, Serialize, ToSchema)]
pub struct RecentStudent {
    pub id: i32,
    pub admission_number: String,
    pub first_name: String,
    pub last_name: String,
    pub class_id: Option<i32>,
    pub section: Option<String>,
    pub created_at: NaiveDateTime,
}

impl From<student::Model> for RecentStudent {
    fn from(model: student::Model) -> Self {
        Self {
            id: model.id,
            admission_number: model.admission_number,
            first_name: model.first_name,
            last_name: model.last_name,
            class_id: model.class_id,
            section: model.section,
            created_at: model.created_at,
        }
    }
}

/// Five independent facets, assembled as-is. `Default` is the all-zero
/// snapshot the page falls back to when any read fails.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_students: u64,
    pub total_marks_entries: u64,
    pub recent_students: Vec<RecentStudent>,
    pub recent_marks: Vec<RecentMarkRow>,
    pub students_by_class: Vec<ClassSectionCount>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub title: String,
    pub stats: DashboardStats,
    pub notices: Vec<FlashMessage>,
}
