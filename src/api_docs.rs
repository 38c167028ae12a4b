use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::route::health,
        crate::routes::auth::route::login_page,
        crate::routes::auth::route::login,
        crate::routes::auth::route::logout,
        crate::routes::auth::route::setup,
        crate::routes::students::route::get_all_students,
        crate::routes::students::route::create_student,
        crate::routes::students::route::get_student_details,
        crate::routes::students::route::update_student,
        crate::routes::students::route::delete_student,
        crate::routes::marks::route::get_all_marks,
        crate::routes::marks::route::create_mark,
        crate::routes::marks::route::update_mark,
        crate::routes::marks::route::delete_mark,
        crate::routes::marks::route::get_report_card,
        crate::routes::dashboard::route::index,
        crate::routes::dashboard::route::dashboard,
    ),
    components(schemas(
        crate::routes::health::route::HealthResponse,
        crate::routes::auth::dto::LoginRequest,
        crate::routes::auth::dto::LoginPageResponse,
        crate::routes::students::dto::StudentForm,
        crate::routes::students::dto::StudentResponse,
        crate::routes::students::dto::StudentListResponse,
        crate::routes::students::dto::StudentDetailsResponse,
        crate::routes::students::dto::DeleteStudentResponse,
        crate::routes::marks::dto::MarkForm,
        crate::routes::marks::dto::MarkUpdateForm,
        crate::routes::marks::dto::MarkResponse,
        crate::routes::marks::dto::MarksPageResponse,
        crate::routes::marks::dto::StudentOption,
        crate::routes::marks::dto::SubjectOption,
        crate::routes::marks::dto::ReportStudent,
        crate::routes::marks::dto::ReportCardResponse,
        crate::routes::marks::dto::DeleteMarkResponse,
        crate::routes::dashboard::dto::RecentStudent,
        crate::routes::dashboard::dto::DashboardStats,
        crate::routes::dashboard::dto::DashboardResponse,
        crate::repositories::MarksheetRow,
        crate::repositories::StudentMarkRow,
        crate::repositories::RecentMarkRow,
        crate::repositories::ClassSectionCount,
        crate::redis_service::FlashKind,
        crate::redis_service::FlashMessage,
        crate::grading::Grade,
        crate::grading::MarkEntry,
        crate::grading::SubjectAggregate,
        crate::grading::ReportSummary,
    )),
    tags(
        (name = "Authentication", description = "Session login, logout and setup"),
        (name = "Students", description = "Student roster management"),
        (name = "Marks", description = "Exam marks and report cards"),
        (name = "Dashboard", description = "Summary statistics"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;
