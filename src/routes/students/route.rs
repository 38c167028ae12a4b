use axum::{
    Form, Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
};
use sea_orm::Set;

use super::dto::{
    DeleteStudentResponse, StudentDetailsResponse, StudentForm, StudentListResponse,
    StudentQueryParams, StudentResponse,
};
use crate::error::ServiceError;
use crate::extractor::SessionAuth;
use crate::repositories::{MarkRepository, StudentRepository};

const DUPLICATE_STUDENT_MESSAGE: &str = "Admission number or roll number already exists";

pub fn create_route() -> Router {
    Router::new()
        .route("/students", get(get_all_students).post(create_student))
        .route(
            "/students/{student_id}",
            get(get_student_details)
                .put(update_student)
                .delete(delete_student),
        )
}

/// Roster listing with search and filters
#[utoipa::path(
    get,
    path = "/students",
    params(StudentQueryParams),
    responses(
        (status = 200, description = "Student roster", body = StudentListResponse),
        (status = 303, description = "Not authenticated, redirected to login"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn get_all_students(
    SessionAuth(_identity): SessionAuth,
    Query(params): Query<StudentQueryParams>,
) -> Result<Json<StudentListResponse>, ServiceError> {
    let status = params.status_filter().map_err(ServiceError::Validation)?;
    let class_id = params.class_filter().map_err(ServiceError::Validation)?;

    let student_repo = StudentRepository::new();
    let students = student_repo.search(params.search, status, class_id).await?;

    Ok(Json(StudentListResponse {
        students: students.into_iter().map(StudentResponse::from).collect(),
    }))
}

/// Handler for enrolling a student
#[utoipa::path(
    post,
    path = "/students",
    request_body(content = StudentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Student created", body = StudentResponse),
        (status = 400, description = "Invalid field value"),
        (status = 409, description = "Admission number or roll number already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn create_student(
    SessionAuth(_identity): SessionAuth,
    Form(payload): Form<StudentForm>,
) -> Result<(StatusCode, Json<StudentResponse>), ServiceError> {
    let data = payload
        .into_active_model()
        .map_err(ServiceError::Validation)?;

    let student_repo = StudentRepository::new();
    let created = student_repo
        .insert(data)
        .await
        .map_err(|err| ServiceError::from_db_error(err, DUPLICATE_STUDENT_MESSAGE))?;

    Ok((StatusCode::CREATED, Json(StudentResponse::from(created))))
}

/// Student detail view including all recorded marks
#[utoipa::path(
    get,
    path = "/students/{student_id}",
    params(("student_id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student details", body = StudentDetailsResponse),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn get_student_details(
    SessionAuth(_identity): SessionAuth,
    Path(student_id): Path<i32>,
) -> Result<Json<StudentDetailsResponse>, ServiceError> {
    let student_repo = StudentRepository::new();
    let student = student_repo
        .find_by_id(student_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Student not found"))?;

    let mark_repo = MarkRepository::new();
    let marks = mark_repo.list_for_student(student_id).await?;

    Ok(Json(StudentDetailsResponse {
        student: StudentResponse::from(student),
        marks,
    }))
}

/// Full update of a student record
#[utoipa::path(
    put,
    path = "/students/{student_id}",
    params(("student_id" = i32, Path, description = "Student id")),
    request_body(content = StudentForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Invalid field value"),
        (status = 404, description = "Student not found"),
        (status = 409, description = "Admission number or roll number already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn update_student(
    SessionAuth(_identity): SessionAuth,
    Path(student_id): Path<i32>,
    Form(payload): Form<StudentForm>,
) -> Result<Json<StudentResponse>, ServiceError> {
    let student_repo = StudentRepository::new();
    student_repo
        .find_by_id(student_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Student not found"))?;

    let mut data = payload
        .into_active_model()
        .map_err(ServiceError::Validation)?;
    data.id = Set(student_id);

    let updated = student_repo
        .update(data)
        .await
        .map_err(|err| ServiceError::from_db_error(err, DUPLICATE_STUDENT_MESSAGE))?;

    Ok(Json(StudentResponse::from(updated)))
}

/// Removes a student; their marks cascade away with them
#[utoipa::path(
    delete,
    path = "/students/{student_id}",
    params(("student_id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student deleted", body = DeleteStudentResponse),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Students"
)]
pub async fn delete_student(
    SessionAuth(_identity): SessionAuth,
    Path(student_id): Path<i32>,
) -> Result<Json<DeleteStudentResponse>, ServiceError> {
    let student_repo = StudentRepository::new();
    let rows_affected = student_repo.delete_by_id(student_id).await?;

    if rows_affected == 0 {
        return Err(ServiceError::not_found("Student not found"));
    }

    Ok(Json(DeleteStudentResponse {
        message: "Student deleted successfully!".to_string(),
    }))
}
