use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;

use frontdesk_domain::id::SessionId;

use crate::domain::repository::SessionStore;
use crate::error::IntakeServiceError;

/// Session state in Redis, one key per `(session, name)`.
///
/// Every write refreshes the key's TTL, so state lives as long as the session
/// cookie when the visitor keeps using the kiosk.
#[derive(Clone)]
pub struct RedisSessionStore {
    pub pool: Pool,
    pub ttl_secs: u64,
}

fn session_key(session: SessionId, name: &str) -> String {
    format!("session:{}:{}", session, name)
}

impl SessionStore for RedisSessionStore {
    async fn get(
        &self,
        session: SessionId,
        key: &str,
    ) -> Result<Option<serde_json::Value>, IntakeServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| IntakeServiceError::Internal(e.into()))?;
        let raw: Option<Vec<u8>> = conn
            .get(session_key(session, key))
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| IntakeServiceError::Internal(e.into()))?;
        // Unparseable state is treated as absent; the next write replaces it.
        Ok(raw.and_then(|bytes| serde_json::from_slice(&bytes).ok()))
    }

    async fn set(
        &self,
        session: SessionId,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), IntakeServiceError> {
        let bytes = serde_json::to_vec(&value).map_err(|e| IntakeServiceError::Internal(e.into()))?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| IntakeServiceError::Internal(e.into()))?;
        let (): () = conn
            .set_ex(session_key(session, key), bytes, self.ttl_secs)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| IntakeServiceError::Internal(e.into()))?;
        Ok(())
    }

    async fn clear(&self, session: SessionId, key: &str) -> Result<(), IntakeServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| IntakeServiceError::Internal(e.into()))?;
        let _: u64 = conn
            .del(session_key(session, key))
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| IntakeServiceError::Internal(e.into()))?;
        Ok(())
    }
}
