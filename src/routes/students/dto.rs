use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::sea_orm_active_enums::StudentStatus;
use crate::entities::student;
use crate::repositories::StudentMarkRow;

#[derive(Debug, Deserialize, IntoParams)]
pub struct StudentQueryParams {
    /// Matches name, admission number or roll number
    pub search: Option<String>,
    pub status: Option<String>,
    pub class_id: Option<String>,
}

impl StudentQueryParams {
    /// Blank selects arrive as empty strings and mean "no filter".
    pub fn status_filter(&self) -> Result<Option<StudentStatus>, String> {
        match optional_field(self.status.clone()).as_deref() {
            None => Ok(None),
            Some("active") => Ok(Some(StudentStatus::Active)),
            Some("inactive") => Ok(Some(StudentStatus::Inactive)),
            Some("graduated") => Ok(Some(StudentStatus::Graduated)),
            Some(other) => Err(format!("Invalid status: {}", other)),
        }
    }

    pub fn class_filter(&self) -> Result<Option<i32>, String> {
        parse_optional_i32(self.class_id.clone(), "class")
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StudentForm {
    pub admission_number: String,
    pub first_name: String,
    pub last_name: String,
    pub roll_number: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub class_id: Option<String>,
    pub section: Option<String>,
    pub academic_year: Option<String>,
    pub status: Option<String>,
}

/// Treats blank form fields as absent.
fn optional_field(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_optional_date(value: Option<String>, field: &str) -> Result<Option<NaiveDate>, String> {
    match optional_field(value) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| format!("Invalid {}: expected YYYY-MM-DD", field)),
    }
}

fn parse_optional_i32(value: Option<String>, field: &str) -> Result<Option<i32>, String> {
    match optional_field(value) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i32>()
            .map(Some)
            .map_err(|_| format!("Invalid {}: expected a number", field)),
    }
}

fn parse_status(value: Option<String>) -> Result<StudentStatus, String> {
    match optional_field(value).as_deref() {
        None | Some("active") => Ok(StudentStatus::Active),
        Some("inactive") => Ok(StudentStatus::Inactive),
        Some("graduated") => Ok(StudentStatus::Graduated),
        Some(other) => Err(format!("Invalid status: {}", other)),
    }
}

impl StudentForm {
    /// Explicit field parsing at the store boundary; blank optionals become
    /// NULL the way the original form handling treated them.
    pub fn into_active_model(self) -> Result<student::ActiveModel, String> {
        let date_of_birth = parse_optional_date(self.date_of_birth, "date of birth")?;
        let class_id = parse_optional_i32(self.class_id, "class")?;
        let status = parse_status(self.status)?;

        Ok(student::ActiveModel {
            admission_number: Set(self.admission_number),
            first_name: Set(self.first_name),
            last_name: Set(self.last_name),
            roll_number: Set(self.roll_number),
            gender: Set(optional_field(self.gender)),
            date_of_birth: Set(date_of_birth),
            email: Set(optional_field(self.email)),
            phone: Set(optional_field(self.phone)),
            address: Set(optional_field(self.address)),
            class_id: Set(class_id),
            section: Set(optional_field(self.section)),
            academic_year: Set(optional_field(self.academic_year)),
            status: Set(status),
            ..Default::default()
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: i32,
    pub admission_number: String,
    pub first_name: String,
    pub last_name: String,
    pub roll_number: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub class_id: Option<i32>,
    pub section: Option<String>,
    pub academic_year: Option<String>,
    #[schema(value_type = String)]
    pub status: StudentStatus,
    pub created_at: NaiveDateTime,
}

impl From<student::Model> for StudentResponse {
    fn from(model: student::Model) -> Self {
        Self {
            id: model.id,
            admission_number: model.admission_number,
            first_name: model.first_name,
            last_name: model.last_name,
            roll_number: model.roll_number,
            gender: model.gender,
            date_of_birth: model.date_of_birth,
            email: model.email,
            phone: model.phone,
            address: model.address,
            class_id: model.class_id,
            section: model.section,
            academic_year: model.academic_year,
            status: model.status,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentListResponse {
    pub students: Vec<StudentResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentDetailsResponse {
    pub student: StudentResponse,
    pub marks: Vec<StudentMarkRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteStudentResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> StudentForm {
        StudentForm {
            admission_number: "ADM001".to_string(),
            first_name: "Asha".to_string(),
            last_name: "Verma".to_string(),
            roll_number: "R-12".to_string(),
            gender: Some("female".to_string()),
            date_of_birth: Some("2008-03-14".to_string()),
            email: Some("".to_string()),
            phone: None,
            address: Some("  ".to_string()),
            class_id: Some("7".to_string()),
            section: Some("A".to_string()),
            academic_year: Some("2024-2025".to_string()),
            status: None,
        }
    }

    #[test]
    fn blank_query_filters_are_ignored() {
        let params = StudentQueryParams {
            search: None,
            status: Some("".to_string()),
            class_id: Some("".to_string()),
        };

        assert_eq!(params.status_filter().unwrap(), None);
        assert_eq!(params.class_filter().unwrap(), None);
    }

    #[test]
    fn unknown_status_filter_is_rejected() {
        let params = StudentQueryParams {
            search: None,
            status: Some("expelled".to_string()),
            class_id: None,
        };

        assert!(params.status_filter().is_err());
    }

    #[test]
    fn blank_optionals_become_null() {
        let model = form().into_active_model().unwrap();

        assert_eq!(model.email.unwrap(), None);
        assert_eq!(model.address.unwrap(), None);
        assert_eq!(model.phone.unwrap(), None);
        assert_eq!(model.class_id.unwrap(), Some(7));
        assert_eq!(model.status.unwrap(), StudentStatus::Active);
    }

    #[test]
    fn bad_date_is_rejected() {
        let mut bad = form();
        bad.date_of_birth = Some("14/03/2008".to_string());

        let err = bad.into_active_model().unwrap_err();
        assert!(err.contains("date of birth"));
    }

    #[test]
    fn bad_class_id_is_rejected() {
        let mut bad = form();
        bad.class_id = Some("seven".to_string());

        assert!(bad.into_active_model().is_err());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut bad = form();
        bad.status = Some("expelled".to_string());

        assert!(bad.into_active_model().is_err());
    }
}
