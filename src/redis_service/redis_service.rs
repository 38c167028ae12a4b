use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{APP_CONFIG, FLASH_TTL_SECONDS, SESSION_TTL_SECONDS};
use crate::session_gate::SessionIdentity;

pub static REDIS_CLIENT: Lazy<redis::Client> = Lazy::new(|| {
    redis::Client::open(APP_CONFIG.redis_url.as_str()).expect("Failed to create Redis client")
});

pub async fn init_redis_connection() -> Result<()> {
    // Test connection
    let mut conn = REDIS_CLIENT
        .get_connection_manager()
        .await
        .context("Failed to get Redis connection")?;

    let _: String = redis::cmd("PING")
        .query_async(&mut conn)
        .await
        .context("Failed to ping Redis")?;

    Ok(())
}

pub async fn get_redis() -> Result<ConnectionManager> {
    REDIS_CLIENT
        .get_connection_manager()
        .await
        .context("Failed to get Redis connection")
}

// Server-side session records, keyed by the cookie value. The TTL is set
// once at login and never refreshed, so a session expires 24 hours after
// creation regardless of activity.
pub struct SessionStore;

impl SessionStore {
    fn key(session_key: &str) -> String {
        format!("session:{}", session_key)
    }

    /// Store the identity under a fresh session key and return the key.
    pub async fn create(identity: &SessionIdentity) -> Result<String> {
        let session_key = Uuid::new_v4().to_string();
        let mut redis = get_redis().await?;

        let json = serde_json::to_string(identity).context("Failed to serialize session")?;
        let _: () = redis
            .set_ex(Self::key(&session_key), json, SESSION_TTL_SECONDS)
            .await?;

        Ok(session_key)
    }

    pub async fn get(session_key: &str) -> Result<Option<SessionIdentity>> {
        let mut redis = get_redis().await?;

        match redis
            .get::<_, Option<String>>(Self::key(session_key))
            .await?
        {
            Some(json) => {
                let identity: SessionIdentity =
                    serde_json::from_str(&json).context("Failed to deserialize session")?;
                Ok(Some(identity))
            }
            None => Ok(None),
        }
    }

    pub async fn destroy(session_key: &str) -> Result<()> {
        let mut redis = get_redis().await?;
        let _: () = redis.del(Self::key(session_key)).await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Error,
    Success,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub message: String,
}

// One-shot notices attached to a session key, drained on the next page
// load. Follows the error/success channel split of the original UI.
pub struct FlashStore;

impl FlashStore {
    fn key(session_key: &str) -> String {
        format!("flash:{}", session_key)
    }

    pub async fn push(session_key: &str, kind: FlashKind, message: &str) -> Result<()> {
        let mut redis = get_redis().await?;
        let key = Self::key(session_key);

        let mut notices: Vec<FlashMessage> = match redis.get::<_, Option<String>>(&key).await? {
            Some(json) => serde_json::from_str(&json).unwrap_or_default(),
            None => Vec::new(),
        };
        notices.push(FlashMessage {
            kind,
            message: message.to_string(),
        });

        let json = serde_json::to_string(&notices).context("Failed to serialize notices")?;
        let _: () = redis.set_ex(&key, json, FLASH_TTL_SECONDS).await?;
        Ok(())
    }

    /// Drain all pending notices for the session. A second call returns
    /// nothing until a new notice is pushed.
    pub async fn take(session_key: &str) -> Result<Vec<FlashMessage>> {
        let mut redis = get_redis().await?;
        let key = Self::key(session_key);

        let notices = match redis.get::<_, Option<String>>(&key).await? {
            Some(json) => serde_json::from_str(&json).unwrap_or_default(),
            None => Vec::new(),
        };
        let _: () = redis.del(&key).await?;

        Ok(notices)
    }
}
