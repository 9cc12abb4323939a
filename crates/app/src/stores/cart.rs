//! Cart Store

use std::{num::NonZeroU32, sync::Arc};

use crumb::{
    cart::{Cart, CartError, CartLine, CartSnapshot},
    pricing::{Price, PricingError},
    products::{Product, ProductId},
};
use rusty_money::iso::Currency;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    storage::{CART_STORAGE_KEY, DocumentStore, StorageError},
    stores::Hydration,
};

/// Cart store error variants.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The persisted cart has not been loaded yet.
    #[error("cart has not been hydrated")]
    NotHydrated,

    /// The mutation was rejected by the cart.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Cart totals could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The cart could not be persisted.
    #[error("failed to persist cart")]
    Storage(#[from] StorageError),
}

/// Process-wide observable cart, persisted on every mutation.
///
/// Clones share the same cart and subscribers.
#[derive(Clone)]
pub struct CartStore {
    storage: Arc<dyn DocumentStore>,
    currency: &'static Currency,
    state: Arc<watch::Sender<Hydration<Cart>>>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("currency", &self.currency.iso_alpha_code)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create an unhydrated store for carts priced in `currency`.
    pub fn new(storage: Arc<dyn DocumentStore>, currency: &'static Currency) -> Self {
        let (state, _receiver) = watch::channel(Hydration::Pending);

        Self {
            storage,
            currency,
            state: Arc::new(state),
        }
    }

    /// Load the persisted cart.
    ///
    /// A missing document hydrates an empty cart. A document that cannot be
    /// decoded, or that was written for another currency, is discarded with a
    /// warning and replaced by an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::Storage`] if the document cannot be read.
    #[tracing::instrument(name = "cart.store.hydrate", skip(self), err)]
    pub fn hydrate(&self) -> Result<(), CartStoreError> {
        let cart = match self.storage.load(CART_STORAGE_KEY)? {
            Some(document) => self.restore(&document),
            None => Cart::new(self.currency),
        };

        info!(
            lines = cart.len(),
            items = cart.total_items(),
            "hydrated cart"
        );

        self.state.send_replace(Hydration::Ready(cart));

        Ok(())
    }

    /// Currency every cart line is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Subscribe to committed cart changes.
    pub fn subscribe(&self) -> watch::Receiver<Hydration<Cart>> {
        self.state.subscribe()
    }

    /// Current cart state.
    pub fn get(&self) -> Hydration<Cart> {
        self.state.borrow().clone()
    }

    /// Current cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::NotHydrated`] before [`CartStore::hydrate`] has run.
    pub fn cart(&self) -> Result<Cart, CartStoreError> {
        self.get().into_ready().ok_or(CartStoreError::NotHydrated)
    }

    /// Add one unit of `product`, returning the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the store is not hydrated, the cart rejects
    /// the product or the cart cannot be persisted.
    pub fn add_item(&self, product: &Product) -> Result<NonZeroU32, CartStoreError> {
        let quantity = self.mutate(|cart| cart.add_item(product))?;

        debug!(product_id = %product.id, quantity = quantity.get(), "added item to cart");

        Ok(quantity)
    }

    /// Set a line's quantity; zero or below removes the line.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the store is not hydrated, the quantity is
    /// out of range or the cart cannot be persisted.
    pub fn update_quantity(
        &self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), CartStoreError> {
        self.mutate(|cart| cart.update_quantity(product_id, quantity))
    }

    /// Remove a line, returning it if it was present.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the store is not hydrated or the cart
    /// cannot be persisted.
    pub fn remove_item(
        &self,
        product_id: ProductId,
    ) -> Result<Option<CartLine>, CartStoreError> {
        self.mutate(|cart| Ok(cart.remove_item(product_id)))
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the store is not hydrated or the cart
    /// cannot be persisted.
    pub fn clear(&self) -> Result<(), CartStoreError> {
        self.mutate(|cart| {
            cart.clear();

            Ok(())
        })
    }

    /// Sum of quantities across all lines.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError::NotHydrated`] before hydration.
    pub fn total_items(&self) -> Result<u64, CartStoreError> {
        self.read(Cart::total_items)
    }

    /// Sum of `unit_price × quantity` across all lines.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] before hydration or if the total overflows.
    pub fn total_price(&self) -> Result<Price, CartStoreError> {
        self.read(Cart::total_price)?.map_err(CartStoreError::from)
    }

    fn read<T>(&self, f: impl FnOnce(&Cart) -> T) -> Result<T, CartStoreError> {
        self.state
            .borrow()
            .ready()
            .map(f)
            .ok_or(CartStoreError::NotHydrated)
    }

    /// Apply `f` to a copy of the cart, persist the copy, then commit and
    /// broadcast it. The channel's write lock is held throughout, so mutations
    /// are serialized. A failed write leaves the committed cart untouched.
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Cart) -> Result<T, CartError>,
    ) -> Result<T, CartStoreError> {
        let mut result = Err(CartStoreError::NotHydrated);

        self.state.send_if_modified(|state| {
            let Hydration::Ready(cart) = state else {
                return false;
            };

            let mut next = cart.clone();

            result = f(&mut next).map_err(CartStoreError::from);

            if result.is_err() || next == *cart {
                return false;
            }

            if let Err(error) = self.persist(&next) {
                result = Err(error);

                return false;
            }

            *cart = next;

            true
        });

        result
    }

    fn persist(&self, cart: &Cart) -> Result<(), CartStoreError> {
        let document = serde_json::to_string(&cart.snapshot()).map_err(|source| {
            StorageError::Json {
                key: CART_STORAGE_KEY.to_string(),
                source,
            }
        })?;

        self.storage.save(CART_STORAGE_KEY, &document)?;

        Ok(())
    }

    fn restore(&self, document: &str) -> Cart {
        let restored = serde_json::from_str::<CartSnapshot>(document)
            .map_err(|error| error.to_string())
            .and_then(|snapshot| {
                Cart::from_snapshot(snapshot).map_err(|error| error.to_string())
            });

        match restored {
            Ok(cart) if cart.currency() == self.currency => cart,
            Ok(cart) => {
                warn!(
                    found = cart.currency().iso_alpha_code,
                    expected = self.currency.iso_alpha_code,
                    "discarding persisted cart in another currency"
                );

                Cart::new(self.currency)
            }
            Err(error) => {
                warn!(%error, "discarding unreadable persisted cart");

                Cart::new(self.currency)
            }
        }
    }
}
