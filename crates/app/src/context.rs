//! App Context

use std::{path::PathBuf, sync::Arc};

use crumb::pricing::Price;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::info;

use crate::{
    api::{ApiClient, ApiConfig, ApiError},
    checkout::{CheckoutOrchestrator, CheckoutSettings},
    domain::{
        menu::{HttpMenuService, MenuService},
        orders::{HttpOrdersService, OrdersService},
        promotions::{HttpPromoService, PromoService},
    },
    gateway::PaymentGateway,
    storage::{FileStore, StorageError},
    stores::{CartStore, CartStoreError, SessionStore, SessionStoreError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to open storage")]
    Storage(#[source] StorageError),

    #[error("failed to hydrate session")]
    Session(#[source] SessionStoreError),

    #[error("failed to hydrate cart")]
    Cart(#[source] CartStoreError),

    #[error("failed to build api client")]
    Api(#[source] ApiError),
}

/// Everything needed to build an [`AppContext`].
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub api: ApiConfig,
    pub storage_dir: PathBuf,
    pub currency: &'static Currency,
    pub delivery_fee: Price,
    pub gateway_public_key: Option<String>,
}

#[derive(Clone)]
pub struct AppContext {
    pub session: SessionStore,
    pub cart: CartStore,
    pub menu: Arc<dyn MenuService>,
    pub promos: Arc<dyn PromoService>,
    pub orders: Arc<dyn OrdersService>,
    pub checkout: CheckoutSettings,
}

impl AppContext {
    /// Open client storage, hydrate the session and cart, and wire the services.
    ///
    /// The session is hydrated before the cart so the first request already
    /// carries the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error when storage cannot be opened or read, or the HTTP
    /// client cannot be built.
    pub fn from_settings(settings: AppSettings) -> Result<Self, AppInitError> {
        let storage =
            Arc::new(FileStore::open(&settings.storage_dir).map_err(AppInitError::Storage)?);

        let session = SessionStore::new(storage.clone());
        session.hydrate().map_err(AppInitError::Session)?;

        let cart = CartStore::new(storage, settings.currency);
        cart.hydrate().map_err(AppInitError::Cart)?;

        let api = ApiClient::new(settings.api, session.clone()).map_err(AppInitError::Api)?;

        info!(
            storage_dir = %settings.storage_dir.display(),
            currency = settings.currency.iso_alpha_code,
            "initialised app context"
        );

        Ok(Self {
            session,
            cart,
            menu: Arc::new(HttpMenuService::new(api.clone())),
            promos: Arc::new(HttpPromoService::new(api.clone(), settings.currency)),
            orders: Arc::new(HttpOrdersService::new(api)),
            checkout: CheckoutSettings {
                public_key: settings.gateway_public_key,
                delivery_fee: settings.delivery_fee,
            },
        })
    }

    /// Start a checkout session that pays through `gateway`.
    pub fn checkout(&self, gateway: Arc<dyn PaymentGateway>) -> CheckoutOrchestrator {
        CheckoutOrchestrator::new(
            self.cart.clone(),
            self.promos.clone(),
            self.orders.clone(),
            gateway,
            self.checkout.clone(),
        )
    }
}
