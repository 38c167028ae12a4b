use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use uuid::Uuid;

use crate::config::SESSION_COOKIE_NAME;
use crate::redis_service::{FlashKind, FlashStore, SessionStore};
use crate::session_gate::{SessionIdentity, SessionState};

pub fn session_cookie(session_key: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE_NAME, session_key);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie
}

pub fn session_key_from_jar(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}

/// Reuses the caller's session key or mints one so flash notices have
/// somewhere to live before login.
pub fn ensure_session_cookie(jar: CookieJar) -> (CookieJar, String) {
    match session_key_from_jar(&jar) {
        Some(session_key) => (jar, session_key),
        None => {
            let session_key = Uuid::new_v4().to_string();
            let jar = jar.add(session_cookie(session_key.clone()));
            (jar, session_key)
        }
    }
}

/// Resolves the request's session state from the cookie. A store failure
/// degrades to `Anonymous`: the gate fails closed.
pub async fn resolve_session_state(jar: &CookieJar) -> SessionState {
    let Some(session_key) = session_key_from_jar(jar) else {
        return SessionState::Anonymous;
    };

    match SessionStore::get(&session_key).await {
        Ok(Some(identity)) => SessionState::Authenticated(identity),
        Ok(None) => SessionState::Anonymous,
        Err(err) => {
            tracing::warn!("Session lookup failed: {:#}", err);
            SessionState::Anonymous
        }
    }
}

/// Guard for routes that require authentication. Anonymous callers are
/// redirected to the login page with a notice.
pub struct SessionAuth(pub SessionIdentity);

impl<S> FromRequestParts<S> for SessionAuth
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .unwrap_or_default();

        match resolve_session_state(&jar).await {
            SessionState::Authenticated(identity) => Ok(Self(identity)),
            SessionState::Anonymous => {
                let (jar, session_key) = ensure_session_cookie(jar);
                if let Err(err) = FlashStore::push(
                    &session_key,
                    FlashKind::Error,
                    "Please log in to access this page",
                )
                .await
                {
                    tracing::warn!("Failed to store login notice: {:#}", err);
                }

                Err((jar, Redirect::to("/auth/login")).into_response())
            }
        }
    }
}

/// Guard for routes that require anonymity (the login page). Authenticated
/// callers are bounced to the dashboard.
pub struct RequireAnonymous;

impl<S> FromRequestParts<S> for RequireAnonymous
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .unwrap_or_default();

        match resolve_session_state(&jar).await {
            SessionState::Anonymous => Ok(Self),
            SessionState::Authenticated(_) => Err(Redirect::to("/dashboard").into_response()),
        }
    }
}
