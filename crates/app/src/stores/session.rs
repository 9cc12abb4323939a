//! Auth Session Store

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::{
    storage::{AUTH_STORAGE_KEY, DocumentStore, StorageError},
    stores::Hydration,
};

/// Session store error variants.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// The persisted session has not been loaded yet.
    #[error("session has not been hydrated")]
    NotHydrated,

    /// Tokens must not be blank.
    #[error("token cannot be empty")]
    EmptyToken,

    /// The session could not be persisted.
    #[error("failed to persist session")]
    Storage(#[from] StorageError),
}

/// Signed-in user as reported at sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Display name
    pub name: String,

    /// Account email
    pub email: String,

    /// Avatar reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Account role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// An authenticated session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token
    pub token: String,

    /// Signed-in user, if known
    #[serde(default)]
    pub user: Option<SessionUser>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Process-wide observable auth session, persisted under `auth-storage`.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn DocumentStore>,
    state: Arc<watch::Sender<Hydration<Option<Session>>>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create an unhydrated store.
    pub fn new(storage: Arc<dyn DocumentStore>) -> Self {
        let (state, _receiver) = watch::channel(Hydration::Pending);

        Self {
            storage,
            state: Arc::new(state),
        }
    }

    /// Load the persisted session. Unreadable documents are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Storage`] if the document cannot be read.
    #[tracing::instrument(name = "session.store.hydrate", skip(self), err)]
    pub fn hydrate(&self) -> Result<(), SessionStoreError> {
        let session = match self.storage.load(AUTH_STORAGE_KEY)? {
            Some(document) => match serde_json::from_str::<Session>(&document) {
                Ok(session) => Some(session),
                Err(error) => {
                    warn!(%error, "discarding unreadable persisted session");

                    None
                }
            },
            None => None,
        };

        info!(authenticated = session.is_some(), "hydrated session");

        self.state.send_replace(Hydration::Ready(session));

        Ok(())
    }

    /// Subscribe to session changes.
    pub fn subscribe(&self) -> watch::Receiver<Hydration<Option<Session>>> {
        self.state.subscribe()
    }

    /// Current session state.
    pub fn get(&self) -> Hydration<Option<Session>> {
        self.state.borrow().clone()
    }

    /// Bearer token of the current session, if signed in.
    pub fn token(&self) -> Option<String> {
        self.state
            .borrow()
            .ready()
            .and_then(Option::as_ref)
            .map(|session| session.token.clone())
    }

    /// Check if a session is present.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persist and publish a new session.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionStoreError`] if the store is not hydrated, the token is
    /// blank or the session cannot be persisted.
    pub fn login(&self, session: Session) -> Result<(), SessionStoreError> {
        if session.token.trim().is_empty() {
            return Err(SessionStoreError::EmptyToken);
        }

        if !self.state.borrow().is_ready() {
            return Err(SessionStoreError::NotHydrated);
        }

        let document =
            serde_json::to_string(&session).map_err(|source| StorageError::Json {
                key: AUTH_STORAGE_KEY.to_string(),
                source,
            })?;

        self.storage.save(AUTH_STORAGE_KEY, &document)?;
        self.state.send_replace(Hydration::Ready(Some(session)));

        info!("signed in");

        Ok(())
    }

    /// Forget the current session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Storage`] if the persisted session cannot be removed.
    pub fn logout(&self) -> Result<(), SessionStoreError> {
        self.storage.remove(AUTH_STORAGE_KEY)?;
        self.state.send_replace(Hydration::Ready(None));

        info!("signed out");

        Ok(())
    }
}
