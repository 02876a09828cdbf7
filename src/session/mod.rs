pub mod store;

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{LoginResponse, TokenPair, UserProfile};

pub use store::{
    ACCESS_TOKEN_KEY, MemorySessionStore, REFRESH_TOKEN_KEY, SessionStore, SqliteSessionStore,
    USER_KEY,
};

const CHANGE_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: UserProfile,
    pub tokens: TokenPair,
}

impl Session {
    pub fn display_name(&self) -> String {
        self.user.display_name()
    }

    pub fn access_token(&self) -> &str {
        &self.tokens.access
    }
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Session {
            user: resp.user,
            tokens: resp.token,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChange {
    SignedIn,
    ProfileUpdated,
    SignedOut,
}

/// Handle to the session store shared by every page. Cloning is cheap and
/// all clones observe the same store and change feed.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    changes: broadcast::Sender<AuthChange>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { store, changes }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// The stored session, or `None` when it is missing, unreadable, or the
    /// store itself fails.
    pub async fn read(&self) -> Option<Session> {
        match self.try_read().await {
            Ok(session) => session,
            Err(e) => {
                warn!("session store unavailable, treating as signed out: {}", e);
                None
            }
        }
    }

    async fn try_read(&self) -> Result<Option<Session>> {
        let Some(access) = self.store.get(ACCESS_TOKEN_KEY).await? else {
            return Ok(None);
        };
        let Some(refresh) = self.store.get(REFRESH_TOKEN_KEY).await? else {
            return Ok(None);
        };
        let Some(raw_user) = self.store.get(USER_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<UserProfile>(&raw_user) {
            Ok(user) => Ok(Some(Session {
                user,
                tokens: TokenPair { access, refresh },
            })),
            Err(e) => {
                warn!("stored user is unreadable, treating as signed out: {}", e);
                Ok(None)
            }
        }
    }

    /// Only the bearer token; pages gate on this before any request.
    pub async fn access_token(&self) -> Option<String> {
        match self.store.get(ACCESS_TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(e) => {
                warn!("session store unavailable: {}", e);
                None
            }
        }
    }

    pub async fn save(&self, session: &Session) -> Result<()> {
        let user = serde_json::to_string(&session.user).map_err(|source| {
            crate::error::ClientError::Decode {
                endpoint: "session".to_string(),
                source,
            }
        })?;
        self.store
            .put_all(&[
                (USER_KEY, user),
                (ACCESS_TOKEN_KEY, session.tokens.access.clone()),
                (REFRESH_TOKEN_KEY, session.tokens.refresh.clone()),
            ])
            .await?;
        self.notify(AuthChange::SignedIn);
        Ok(())
    }

    /// Replaces the stored profile of the signed-in user.
    pub async fn update_user(&self, user: &UserProfile) -> Result<()> {
        let raw = serde_json::to_string(user).map_err(|source| {
            crate::error::ClientError::Decode {
                endpoint: "session".to_string(),
                source,
            }
        })?;
        self.store.put_all(&[(USER_KEY, raw)]).await?;
        self.notify(AuthChange::ProfileUpdated);
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.clear().await?;
        self.notify(AuthChange::SignedOut);
        Ok(())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AuthChange> {
        self.changes.subscribe()
    }

    fn notify(&self, change: AuthChange) {
        // Sending only fails when nobody is subscribed.
        let receivers = self.changes.send(change).unwrap_or(0);
        debug!(?change, receivers, "auth change broadcast");
    }
}
