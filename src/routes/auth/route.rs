use axum::{
    Form, Json, Router,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use super::dto::{LoginPageResponse, LoginRequest};
use crate::config::{APP_CONFIG, SESSION_COOKIE_NAME};
use crate::error::ServiceError;
use crate::extractor::{
    RequireAnonymous, ensure_session_cookie, session_cookie, session_key_from_jar,
};
use crate::redis_service::{FlashKind, FlashStore};
use crate::repositories::{SubjectRepository, UserRepository};
use crate::session_gate::{self, CredentialError, INVALID_CREDENTIALS_NOTICE};

pub fn create_route() -> Router {
    Router::new()
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/logout", get(logout))
        .route("/auth/setup", get(setup))
}

async fn flash(session_key: &str, kind: FlashKind, message: &str) {
    if let Err(err) = FlashStore::push(session_key, kind, message).await {
        tracing::warn!("Failed to store notice: {:#}", err);
    }
}

/// Login page payload with any pending notices drained
#[utoipa::path(
    get,
    path = "/auth/login",
    responses(
        (status = 200, description = "Login page data", body = LoginPageResponse),
        (status = 303, description = "Already authenticated, redirected to dashboard")
    ),
    tag = "Authentication"
)]
pub async fn login_page(_guard: RequireAnonymous, jar: CookieJar) -> Json<LoginPageResponse> {
    let notices = match session_key_from_jar(&jar) {
        Some(session_key) => FlashStore::take(&session_key).await.unwrap_or_else(|err| {
            tracing::warn!("Failed to read notices: {:#}", err);
            Vec::new()
        }),
        None => Vec::new(),
    };

    Json(LoginPageResponse {
        title: "Login - Student Management System".to_string(),
        notices,
    })
}

async fn login_failed(jar: CookieJar, notice: &str) -> Response {
    let (jar, session_key) = ensure_session_cookie(jar);
    flash(&session_key, FlashKind::Error, notice).await;
    (jar, Redirect::to("/auth/login")).into_response()
}

/// Credential check; both failure modes surface the same notice
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to dashboard on success, back to login on failure")
    ),
    tag = "Authentication"
)]
pub async fn login(
    _guard: RequireAnonymous,
    jar: CookieJar,
    Form(payload): Form<LoginRequest>,
) -> Response {
    let user_repo = UserRepository::new();

    let account = match user_repo.find_active_by_username(&payload.username).await {
        Ok(account) => account,
        Err(err) => {
            tracing::error!("Login error: {:#}", err);
            return login_failed(jar, "An error occurred during login").await;
        }
    };

    match session_gate::verify_credentials(account, &payload.password) {
        Ok(identity) => {
            let session_key = match session_gate::establish_session(&identity).await {
                Ok(session_key) => session_key,
                Err(err) => {
                    tracing::error!("Failed to create session: {:#}", err);
                    return login_failed(jar, "An error occurred during login").await;
                }
            };

            let welcome = format!("Welcome back, {}!", identity.full_name);
            flash(&session_key, FlashKind::Success, &welcome).await;

            let jar = jar.add(session_cookie(session_key));
            (jar, Redirect::to("/dashboard")).into_response()
        }
        Err(CredentialError::Rejected) => login_failed(jar, INVALID_CREDENTIALS_NOTICE).await,
        Err(CredentialError::Hash(err)) => {
            tracing::error!("Password verification error: {}", err);
            login_failed(jar, "An error occurred during login").await
        }
    }
}

/// Unconditional transition back to Anonymous
#[utoipa::path(
    get,
    path = "/auth/logout",
    responses((status = 303, description = "Redirect to login page")),
    tag = "Authentication"
)]
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    if let Some(session_key) = session_key_from_jar(&jar) {
        session_gate::terminate_session(&session_key).await;
    }

    let mut removal = Cookie::from(SESSION_COOKIE_NAME);
    removal.set_path("/");
    let jar = jar.remove(removal);

    (jar, Redirect::to("/auth/login"))
}

/// One-time setup: upsert the admin account and seed the subject catalogue
#[utoipa::path(
    get,
    path = "/auth/setup",
    responses(
        (status = 303, description = "Redirect to login page"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn setup(jar: CookieJar) -> Result<Response, ServiceError> {
    let password_hash = bcrypt::hash(&APP_CONFIG.admin_password, bcrypt::DEFAULT_COST)
        .map_err(|err| ServiceError::Upstream(err.into()))?;

    let user_repo = UserRepository::new();
    user_repo
        .upsert_admin(
            &APP_CONFIG.admin_username,
            &password_hash,
            &APP_CONFIG.admin_email,
            "System Administrator",
        )
        .await?;

    let subject_repo = SubjectRepository::new();
    subject_repo.ensure_sample_subjects().await?;

    let (jar, session_key) = ensure_session_cookie(jar);
    flash(
        &session_key,
        FlashKind::Success,
        "Admin user created/updated successfully",
    )
    .await;

    Ok((jar, Redirect::to("/auth/login")).into_response())
}
