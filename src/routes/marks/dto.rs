use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::{mark, student, subject};
use crate::grading::{ReportSummary, SubjectAggregate};
use crate::repositories::{MarksheetFilter, MarksheetRow};

#[derive(Debug, Deserialize, IntoParams)]
pub struct MarksQueryParams {
    pub academic_year: Option<String>,
    pub exam_type: Option<String>,
    pub student_id: Option<String>,
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

fn parse_optional_i32(value: Option<String>, field: &str) -> Result<Option<i32>, String> {
    match optional_field(value) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i32>()
            .map(Some)
            .map_err(|_| format!("Invalid {}: expected a number", field)),
    }
}

impl MarksQueryParams {
    /// Blank filter fields mean "show everything".
    pub fn into_filter(self) -> Result<MarksheetFilter, String> {
        Ok(MarksheetFilter {
            academic_year: optional_field(self.academic_year),
            exam_type: optional_field(self.exam_type),
            student_id: parse_optional_i32(self.student_id, "student")?,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ReportCardQuery {
    pub student_id: i32,
    /// e.g. "2024-2025"
    pub academic_year: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MarkForm {
    pub student_id: i32,
    pub subject_id: i32,
    pub exam_type: String,
    pub marks_obtained: String,
    pub max_marks: Option<String>,
    pub exam_date: String,
    pub academic_year: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MarkUpdateForm {
    pub marks_obtained: String,
    pub max_marks: Option<String>,
    pub exam_date: String,
}

/// Explicit numeric parsing so junk input is rejected at the boundary and
/// NaN can never reach the aggregation.
fn parse_marks_value(raw: &str, field: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("Invalid {}: expected a number", field))?;

    if !value.is_finite() {
        return Err(format!("Invalid {}: expected a number", field));
    }

    Ok(value)
}

/// A blank maximum defaults to 100, matching the form's placeholder.
fn parse_max_marks(raw: Option<String>) -> Result<f64, String> {
    match raw {
        Some(value) if !value.trim().is_empty() => parse_marks_value(&value, "max marks"),
        _ => Ok(100.0),
    }
}

fn parse_exam_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| "Invalid exam date: expected YYYY-MM-DD".to_string())
}

impl MarkForm {
    pub fn into_active_model(self) -> Result<mark::ActiveModel, String> {
        let marks_obtained = parse_marks_value(&self.marks_obtained, "marks obtained")?;
        let max_marks = parse_max_marks(self.max_marks)?;
        let exam_date = parse_exam_date(&self.exam_date)?;

        Ok(mark::ActiveModel {
            student_id: Set(self.student_id),
            subject_id: Set(Some(self.subject_id)),
            exam_type: Set(self.exam_type),
            marks_obtained: Set(marks_obtained),
            max_marks: Set(max_marks),
            exam_date: Set(exam_date),
            academic_year: Set(self.academic_year),
            ..Default::default()
        })
    }
}

impl MarkUpdateForm {
    /// Applies the editable fields onto an existing record.
    pub fn apply(self, existing: mark::Model) -> Result<mark::ActiveModel, String> {
        let marks_obtained = parse_marks_value(&self.marks_obtained, "marks obtained")?;
        let max_marks = parse_max_marks(self.max_marks)?;
        let exam_date = parse_exam_date(&self.exam_date)?;

        let mut data: mark::ActiveModel = existing.into();
        data.marks_obtained = Set(marks_obtained);
        data.max_marks = Set(max_marks);
        data.exam_date = Set(exam_date);
        Ok(data)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MarkResponse {
    pub id: i32,
    pub student_id: i32,
    pub subject_id: Option<i32>,
    pub exam_type: String,
    pub marks_obtained: f64,
    pub max_marks: f64,
    pub exam_date: NaiveDate,
    pub academic_year: String,
    pub created_at: NaiveDateTime,
}

impl From<mark::Model> for MarkResponse {
    fn from(model: mark::Model) -> Self {
        Self {
            id: model.id,
            student_id: model.student_id,
            subject_id: model.subject_id,
            exam_type: model.exam_type,
            marks_obtained: model.marks_obtained,
            max_marks: model.max_marks,
            exam_date: model.exam_date,
            academic_year: model.academic_year,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentOption {
    pub id: i32,
    pub admission_number: String,
    pub first_name: String,
    pub last_name: String,
    pub roll_number: String,
}

impl From<student::Model> for StudentOption {
    fn from(model: student::Model) -> Self {
        Self {
            id: model.id,
            admission_number: model.admission_number,
            first_name: model.first_name,
            last_name: model.last_name,
            roll_number: model.roll_number,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectOption {
    pub id: i32,
    pub subject_code: String,
    pub subject_name: String,
}

impl From<subject::Model> for SubjectOption {
    fn from(model: subject::Model) -> Self {
        Self {
            id: model.id,
            subject_code: model.subject_code,
            subject_name: model.subject_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MarksPageResponse {
    pub title: String,
    pub marks_data: Vec<MarksheetRow>,
    pub students: Vec<StudentOption>,
    pub subjects: Vec<SubjectOption>,
}

/// Student header block of the report card.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportStudent {
    pub id: i32,
    pub admission_number: String,
    pub first_name: String,
    pub last_name: String,
    pub roll_number: String,
    pub class_id: Option<i32>,
    pub section: Option<String>,
}

impl From<student::Model> for ReportStudent {
    fn from(model: student::Model) -> Self {
        Self {
            id: model.id,
            admission_number: model.admission_number,
            first_name: model.first_name,
            last_name: model.last_name,
            roll_number: model.roll_number,
            class_id: model.class_id,
            section: model.section,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportCardResponse {
    pub title: String,
    pub student: ReportStudent,
    pub academic_year: String,
    pub subject_scores: BTreeMap<String, SubjectAggregate>,
    pub summary: ReportSummary,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteMarkResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark_form() -> MarkForm {
        MarkForm {
            student_id: 1,
            subject_id: 2,
            exam_type: "midterm".to_string(),
            marks_obtained: "45".to_string(),
            max_marks: Some("50".to_string()),
            exam_date: "2024-10-15".to_string(),
            academic_year: "2024-2025".to_string(),
        }
    }

    #[test]
    fn blank_marksheet_filters_are_ignored() {
        let params = MarksQueryParams {
            academic_year: Some("".to_string()),
            exam_type: Some(" ".to_string()),
            student_id: Some("".to_string()),
        };

        let filter = params.into_filter().unwrap();
        assert_eq!(filter.academic_year, None);
        assert_eq!(filter.exam_type, None);
        assert_eq!(filter.student_id, None);
    }

    #[test]
    fn blank_max_marks_defaults_to_100() {
        let mut form = mark_form();
        form.max_marks = Some("".to_string());
        assert_eq!(form.into_active_model().unwrap().max_marks.unwrap(), 100.0);

        let mut form = mark_form();
        form.max_marks = None;
        assert_eq!(form.into_active_model().unwrap().max_marks.unwrap(), 100.0);
    }

    #[test]
    fn explicit_zero_max_marks_is_kept() {
        let mut form = mark_form();
        form.max_marks = Some("0".to_string());

        assert_eq!(form.into_active_model().unwrap().max_marks.unwrap(), 0.0);
    }

    #[test]
    fn non_numeric_marks_are_rejected() {
        let mut form = mark_form();
        form.marks_obtained = "forty-five".to_string();

        let err = form.into_active_model().unwrap_err();
        assert!(err.contains("marks obtained"));
    }

    #[test]
    fn nan_input_is_rejected() {
        let mut form = mark_form();
        form.marks_obtained = "NaN".to_string();

        assert!(form.into_active_model().is_err());
    }

    #[test]
    fn bad_exam_date_is_rejected() {
        let mut form = mark_form();
        form.exam_date = "15-10-2024".to_string();

        assert!(form.into_active_model().is_err());
    }
}
