//! Test context for HTTP service tests.

use std::{sync::Arc, time::Duration};

use wiremock::MockServer;

use crate::{
    api::{ApiClient, ApiConfig, ApiError},
    storage::MemoryStore,
    stores::{SessionStore, SessionStoreError},
};

/// Errors raised while building a [`TestContext`].
#[derive(Debug, thiserror::Error)]
pub(crate) enum TestContextError {
    #[error(transparent)]
    Session(#[from] SessionStoreError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub(crate) struct TestContext {
    pub server: MockServer,
    pub session: SessionStore,
    pub api: ApiClient,
}

impl TestContext {
    pub async fn new() -> Result<Self, TestContextError> {
        let server = MockServer::start().await;
        let session = SessionStore::new(Arc::new(MemoryStore::new()));

        session.hydrate()?;

        let api = ApiClient::new(
            ApiConfig {
                base_url: server.uri(),
                timeout: Duration::from_secs(5),
            },
            session.clone(),
        )?;

        Ok(Self {
            server,
            session,
            api,
        })
    }
}
