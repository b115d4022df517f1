use super::models::{Session, UserRole};
use super::store::SessionStore;
use crate::error::AppResult;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Shared session context handed to everything that talks to the backend
#[derive(Clone)]
pub struct SessionHandle {
    current: Arc<RwLock<Option<Session>>>,
    store: Arc<dyn SessionStore>,
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl SessionHandle {
    /// Create a handle with nothing loaded yet
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            store,
        }
    }

    /// Create a handle and load the persisted session
    pub async fn load(store: Arc<dyn SessionStore>) -> AppResult<Self> {
        let handle = Self::new(store);
        let stored = handle.store.load().await?;
        *handle.current.write().await = stored;
        Ok(handle)
    }

    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|s| s.access.clone())
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.current
            .read()
            .await
            .as_ref()
            .and_then(|s| s.refresh.clone())
    }

    pub async fn role(&self) -> Option<UserRole> {
        self.current.read().await.as_ref().and_then(Session::role)
    }

    /// Start a new session (login)
    pub async fn set(&self, session: Session) -> AppResult<()> {
        self.store.save(&session).await?;
        *self.current.write().await = Some(session);
        Ok(())
    }

    /// Swap in a refreshed access token, keeping refresh token and user
    pub async fn update_access(&self, access: String) -> AppResult<Session> {
        let mut current = self.current.write().await;
        let updated = match current.take() {
            Some(mut session) => {
                session.access = access;
                session
            }
            None => Session::new(access, None),
        };
        self.store.save(&updated).await?;
        *current = Some(updated.clone());
        Ok(updated)
    }

    /// End the session (logout or failed refresh)
    pub async fn clear(&self) -> AppResult<()> {
        *self.current.write().await = None;
        self.store.clear().await?;
        info!("Session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::session::store::MemorySessionStore;

    #[tokio::test]
    async fn test_update_access_keeps_refresh_token() {
        let store = Arc::new(MemorySessionStore::new());
        let handle = SessionHandle::new(store.clone());

        handle
            .set(Session {
                access: "old".to_string(),
                refresh: Some("refresh".to_string()),
                user: None,
            })
            .await
            .unwrap();

        let updated = handle.update_access("new".to_string()).await.unwrap();
        assert_eq!(updated.access, "new");
        assert_eq!(updated.refresh.as_deref(), Some("refresh"));

        // Persisted as well
        let stored = store.load().await.unwrap().unwrap();
        assert_eq!(stored.access, "new");
    }

    #[tokio::test]
    async fn test_load_and_clear() {
        let store = Arc::new(MemorySessionStore::new());
        store
            .save(&Session {
                access: "token".to_string(),
                refresh: None,
                user: None,
            })
            .await
            .unwrap();

        let handle = SessionHandle::load(store.clone()).await.unwrap();
        assert_eq!(handle.access_token().await.as_deref(), Some("token"));
        assert_eq!(handle.refresh_token().await, None);

        handle.clear().await.unwrap();
        assert!(handle.current().await.is_none());
        assert!(store.load().await.unwrap().is_none());
    }
}
