//! Authorization state machine: every request is either `Anonymous` or
//! `Authenticated` with a server-side session record behind it. Handlers
//! receive the state explicitly through the extractors in `extractor.rs`;
//! nothing reads ambient session data.

use serde::{Deserialize, Serialize};

use crate::entities::{sea_orm_active_enums::RoleEnum, user};
use crate::redis_service::SessionStore;

/// Notice shown on any credential failure. Deliberately does not reveal
/// whether the username or the password was wrong.
pub const INVALID_CREDENTIALS_NOTICE: &str = "Invalid username or password";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: RoleEnum,
}

impl From<&user::Model> for SessionIdentity {
    fn from(account: &user::Model) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            role: account.role.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum SessionState {
    Anonymous,
    Authenticated(SessionIdentity),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Anonymous => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Unknown/inactive account or wrong password; caller must surface
    /// `INVALID_CREDENTIALS_NOTICE` and nothing more specific.
    #[error("Invalid username or password")]
    Rejected,

    #[error("password verification failed")]
    Hash(#[from] bcrypt::BcryptError),
}

/// `Anonymous -> Authenticated` transition, first half: check the supplied
/// password against the account looked up by the caller. Fails closed on a
/// missing account so both failure modes read identically to the user.
pub fn verify_credentials(
    account: Option<user::Model>,
    password: &str,
) -> Result<SessionIdentity, CredentialError> {
    let Some(account) = account else {
        return Err(CredentialError::Rejected);
    };

    if bcrypt::verify(password, &account.password_hash)? {
        Ok(SessionIdentity::from(&account))
    } else {
        Err(CredentialError::Rejected)
    }
}

/// `Anonymous -> Authenticated`, second half: persist the identity and
/// return the new session key.
pub async fn establish_session(identity: &SessionIdentity) -> anyhow::Result<String> {
    SessionStore::create(identity).await
}

/// `Authenticated -> Anonymous`. Destruction failures are logged and
/// swallowed: the caller always lands back on the anonymous surface.
pub async fn terminate_session(session_key: &str) {
    if let Err(err) = SessionStore::destroy(session_key).await {
        tracing::warn!("Failed to destroy session: {:#}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account_with_password(password: &str) -> user::Model {
        user::Model {
            id: 7,
            username: "admin".to_string(),
            password_hash: bcrypt::hash(password, 4).unwrap(),
            email: "admin@sms.com".to_string(),
            full_name: "System Administrator".to_string(),
            role: RoleEnum::Admin,
            is_active: true,
            created_at: chrono::DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    #[test]
    fn correct_password_yields_identity() {
        let identity = verify_credentials(Some(account_with_password("admin123")), "admin123")
            .expect("valid credentials");

        assert_eq!(identity.id, 7);
        assert_eq!(identity.username, "admin");
        assert_eq!(identity.full_name, "System Administrator");
        assert_eq!(identity.role, RoleEnum::Admin);
    }

    #[test]
    fn wrong_password_is_rejected_with_generic_notice() {
        let err = verify_credentials(Some(account_with_password("admin123")), "letmein")
            .expect_err("wrong password");

        assert!(matches!(err, CredentialError::Rejected));
        assert_eq!(err.to_string(), INVALID_CREDENTIALS_NOTICE);
    }

    #[test]
    fn unknown_account_reads_identically_to_wrong_password() {
        let missing = verify_credentials(None, "admin123").expect_err("unknown account");
        let wrong = verify_credentials(Some(account_with_password("admin123")), "nope")
            .expect_err("wrong password");

        assert_eq!(missing.to_string(), wrong.to_string());
    }

    #[test]
    fn state_predicates() {
        let identity = SessionIdentity::from(&account_with_password("x"));
        let authenticated = SessionState::Authenticated(identity.clone());

        assert!(authenticated.is_authenticated());
        assert!(!authenticated.is_anonymous());
        assert_eq!(authenticated.identity().map(|i| i.id), Some(identity.id));

        assert!(SessionState::Anonymous.is_anonymous());
        assert!(!SessionState::Anonymous.is_authenticated());
        assert!(SessionState::Anonymous.identity().is_none());
    }
}
