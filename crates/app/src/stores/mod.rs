//! Persisted Stores
//!
//! Process-wide observable containers hydrated from client storage. Each store
//! starts [`Hydration::Pending`] and must be hydrated before it can be mutated;
//! subscribers receive every committed change through a `tokio::sync::watch`
//! channel.

pub mod cart;
pub mod session;

pub use cart::{CartStore, CartStoreError};
pub use session::{Session, SessionStore, SessionStoreError, SessionUser};

/// Whether a persisted store has loaded its document yet.
#[derive(Debug, Clone, PartialEq)]
pub enum Hydration<T> {
    /// Persisted state has not been loaded
    Pending,

    /// Persisted state is loaded
    Ready(T),
}

impl<T> Hydration<T> {
    /// Check if the store has been hydrated.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Hydrated value, if ready.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Pending => None,
            Self::Ready(value) => Some(value),
        }
    }

    /// Consume into the hydrated value, if ready.
    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Pending => None,
            Self::Ready(value) => Some(value),
        }
    }
}
