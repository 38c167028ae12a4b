use axum::{Json, Router, response::Redirect, routing::get};
use axum_extra::extract::cookie::CookieJar;

use super::dto::{DashboardResponse, DashboardStats, RecentStudent};
use crate::extractor::{SessionAuth, resolve_session_state, session_key_from_jar};
use crate::redis_service::FlashStore;
use crate::repositories::{MarkRepository, StudentRepository};
use crate::session_gate::SessionState;

pub fn create_route() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/dashboard", get(dashboard))
}

/// Landing surface: authenticated callers go to the dashboard, everyone
/// else to the login page
#[utoipa::path(
    get,
    path = "/",
    responses((status = 303, description = "Redirect to dashboard or login")),
    tag = "Dashboard"
)]
pub async fn index(jar: CookieJar) -> Redirect {
    match resolve_session_state(&jar).await {
        SessionState::Authenticated(_) => Redirect::to("/dashboard"),
        SessionState::Anonymous => Redirect::to("/auth/login"),
    }
}

async fn load_dashboard_stats() -> anyhow::Result<DashboardStats> {
    let student_repo = StudentRepository::new();
    let mark_repo = MarkRepository::new();

    let total_students = student_repo.count_active().await?;
    let total_marks_entries = mark_repo.count_all().await?;
    let recent_students = student_repo.recent(5).await?;
    let recent_marks = mark_repo.recent_with_student(10).await?;
    let students_by_class = student_repo.count_active_by_class_section().await?;

    Ok(DashboardStats {
        total_students,
        total_marks_entries,
        recent_students: recent_students
            .into_iter()
            .map(RecentStudent::from)
            .collect(),
        recent_marks,
        students_by_class,
    })
}

/// The page renders with zeroed stats rather than failing when a read
/// breaks.
fn stats_or_empty(result: anyhow::Result<DashboardStats>) -> DashboardStats {
    match result {
        Ok(stats) => stats,
        Err(err) => {
            tracing::error!("Error fetching dashboard stats: {:#}", err);
            DashboardStats::default()
        }
    }
}

/// Dashboard snapshot: counts, recent activity and roster distribution
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard data", body = DashboardResponse),
        (status = 303, description = "Not authenticated, redirected to login")
    ),
    tag = "Dashboard"
)]
pub async fn dashboard(
    SessionAuth(_identity): SessionAuth,
    jar: CookieJar,
) -> Json<DashboardResponse> {
    let stats = stats_or_empty(load_dashboard_stats().await);

    let notices = match session_key_from_jar(&jar) {
        Some(session_key) => FlashStore::take(&session_key).await.unwrap_or_else(|err| {
            tracing::warn!("Failed to read notices: {:#}", err);
            Vec::new()
        }),
        None => Vec::new(),
    };

    Json(DashboardResponse {
        title: "Dashboard - Student Management System".to_string(),
        stats,
        notices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_read_yields_empty_snapshot() {
        let stats = stats_or_empty(Err(anyhow::anyhow!("connection refused")));

        assert_eq!(stats.total_students, 0);
        assert_eq!(stats.total_marks_entries, 0);
        assert!(stats.recent_students.is_empty());
        assert!(stats.recent_marks.is_empty());
        assert!(stats.students_by_class.is_empty());
    }

    #[test]
    fn successful_read_passes_through() {
        let stats = stats_or_empty(Ok(DashboardStats {
            total_students: 42,
            total_marks_entries: 7,
            ..Default::default()
        }));

        assert_eq!(stats.total_students, 42);
        assert_eq!(stats.total_marks_entries, 7);
    }
}
