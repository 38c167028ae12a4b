use axum::{
    Form, Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, put},
};

use super::dto::{
    DeleteMarkResponse, MarkForm, MarkResponse, MarkUpdateForm, MarksPageResponse,
    MarksQueryParams, ReportCardQuery, ReportCardResponse, ReportStudent, StudentOption,
    SubjectOption,
};
use crate::error::ServiceError;
use crate::extractor::SessionAuth;
use crate::grading::{self, MarkEntry};
use crate::repositories::{MarkRepository, StudentRepository, SubjectRepository};

pub fn create_route() -> Router {
    Router::new()
        .route("/marks", get(get_all_marks).post(create_mark))
        .route("/marks/report-card", get(get_report_card))
        .route("/marks/{mark_id}", put(update_mark).delete(delete_mark))
}

/// Marksheet view: every active student with their filtered exam results,
/// plus the pick-lists the entry form needs
#[utoipa::path(
    get,
    path = "/marks",
    params(MarksQueryParams),
    responses(
        (status = 200, description = "Marksheet data", body = MarksPageResponse),
        (status = 303, description = "Not authenticated, redirected to login"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Marks"
)]
pub async fn get_all_marks(
    SessionAuth(_identity): SessionAuth,
    Query(params): Query<MarksQueryParams>,
) -> Result<Json<MarksPageResponse>, ServiceError> {
    let filter = params.into_filter().map_err(ServiceError::Validation)?;

    let mark_repo = MarkRepository::new();
    let marks_data = mark_repo.marksheet(filter).await?;

    let student_repo = StudentRepository::new();
    let students = student_repo.list_active().await?;

    let subject_repo = SubjectRepository::new();
    let subjects = subject_repo.list_active().await?;

    Ok(Json(MarksPageResponse {
        title: "Marks Management".to_string(),
        marks_data,
        students: students.into_iter().map(StudentOption::from).collect(),
        subjects: subjects.into_iter().map(SubjectOption::from).collect(),
    }))
}

/// Records one exam result
#[utoipa::path(
    post,
    path = "/marks",
    request_body(content = MarkForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Mark recorded", body = MarkResponse),
        (status = 400, description = "Invalid field value"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Marks"
)]
pub async fn create_mark(
    SessionAuth(_identity): SessionAuth,
    Form(payload): Form<MarkForm>,
) -> Result<(StatusCode, Json<MarkResponse>), ServiceError> {
    let data = payload
        .into_active_model()
        .map_err(ServiceError::Validation)?;

    let mark_repo = MarkRepository::new();
    let created = mark_repo.insert(data).await?;

    Ok((StatusCode::CREATED, Json(MarkResponse::from(created))))
}

/// Updates the score, maximum and date of an existing result
#[utoipa::path(
    put,
    path = "/marks/{mark_id}",
    params(("mark_id" = i32, Path, description = "Mark id")),
    request_body(content = MarkUpdateForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Mark updated", body = MarkResponse),
        (status = 400, description = "Invalid field value"),
        (status = 404, description = "Mark not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Marks"
)]
pub async fn update_mark(
    SessionAuth(_identity): SessionAuth,
    Path(mark_id): Path<i32>,
    Form(payload): Form<MarkUpdateForm>,
) -> Result<Json<MarkResponse>, ServiceError> {
    let mark_repo = MarkRepository::new();
    let existing = mark_repo
        .find_by_id(mark_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Marks record not found"))?;

    let data = payload.apply(existing).map_err(ServiceError::Validation)?;
    let updated = mark_repo.update(data).await?;

    Ok(Json(MarkResponse::from(updated)))
}

/// Removes one exam result
#[utoipa::path(
    delete,
    path = "/marks/{mark_id}",
    params(("mark_id" = i32, Path, description = "Mark id")),
    responses(
        (status = 200, description = "Mark deleted", body = DeleteMarkResponse),
        (status = 404, description = "Mark not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Marks"
)]
pub async fn delete_mark(
    SessionAuth(_identity): SessionAuth,
    Path(mark_id): Path<i32>,
) -> Result<Json<DeleteMarkResponse>, ServiceError> {
    let mark_repo = MarkRepository::new();
    let rows_affected = mark_repo.delete_by_id(mark_id).await?;

    if rows_affected == 0 {
        return Err(ServiceError::not_found("Marks record not found"));
    }

    Ok(Json(DeleteMarkResponse {
        message: "Marks deleted successfully!".to_string(),
    }))
}

/// Report card: one student's marks for one academic year reduced to
/// per-subject totals and an overall grade
#[utoipa::path(
    get,
    path = "/marks/report-card",
    params(ReportCardQuery),
    responses(
        (status = 200, description = "Report card data", body = ReportCardResponse),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Marks"
)]
pub async fn get_report_card(
    SessionAuth(_identity): SessionAuth,
    Query(query): Query<ReportCardQuery>,
) -> Result<Json<ReportCardResponse>, ServiceError> {
    let student_repo = StudentRepository::new();
    let student = student_repo
        .find_by_id(query.student_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Student not found"))?;

    let mark_repo = MarkRepository::new();
    let rows = mark_repo
        .list_for_report(query.student_id, &query.academic_year)
        .await?;

    let entries: Vec<MarkEntry> = rows.into_iter().map(MarkEntry::from).collect();
    let (subject_scores, summary) = grading::aggregate(&entries);

    let title = format!("Report Card - {} {}", student.first_name, student.last_name);
    Ok(Json(ReportCardResponse {
        title,
        student: ReportStudent::from(student),
        academic_year: query.academic_year,
        subject_scores,
        summary,
    }))
}
