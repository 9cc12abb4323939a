//! Checkout Orchestrator

use std::sync::Arc;

use crumb::{
    checkout::{
        CheckoutContext, CheckoutEvent, CheckoutState, CheckoutTotals, CustomerDetails,
        GatewayReference, OrderId, ReferenceMinter, SettlementAttempt,
    },
    pricing::Price,
    promotions::PromoDescriptor,
};
use tracing::{Span, info, warn};

use crate::{
    checkout::{
        CheckoutError, Notice, Route,
        errors::{ORDER_CREATION_FAILED, SETTLEMENT_ABANDONED, VERIFICATION_FAILED},
    },
    domain::{
        orders::{OrdersService, models::NewOrder},
        promotions::PromoService,
    },
    gateway::{ChargeMetadata, ChargeRequest, GatewayError, GatewayOutcome, PaymentGateway},
    stores::CartStore,
};

/// Fixed checkout settings.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    /// Gateway merchant key; checkout refuses to start without one.
    pub public_key: Option<String>,

    /// Flat delivery fee added after the discount.
    pub delivery_fee: Price,
}

/// A settled checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub order_id: OrderId,
    pub reference: GatewayReference,
    pub totals: CheckoutTotals,
    pub notice: Notice,
    pub route: Route,
}

/// One checkout session.
///
/// Methods take `&mut self`, so a session runs one step at a time.
pub struct CheckoutOrchestrator {
    cart: CartStore,
    promos: Arc<dyn PromoService>,
    orders: Arc<dyn OrdersService>,
    gateway: Arc<dyn PaymentGateway>,
    settings: CheckoutSettings,
    state: CheckoutState,
    details: CustomerDetails,
    promo: Option<PromoDescriptor>,
    minter: ReferenceMinter,
    last_attempt: Option<SettlementAttempt>,
}

impl std::fmt::Debug for CheckoutOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutOrchestrator")
            .field("state", &self.state)
            .field("promo", &self.promo)
            .field("last_attempt", &self.last_attempt)
            .finish_non_exhaustive()
    }
}

impl CheckoutOrchestrator {
    #[must_use]
    pub fn new(
        cart: CartStore,
        promos: Arc<dyn PromoService>,
        orders: Arc<dyn OrdersService>,
        gateway: Arc<dyn PaymentGateway>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            cart,
            promos,
            orders,
            gateway,
            settings,
            state: CheckoutState::default(),
            details: CustomerDetails::default(),
            promo: None,
            minter: ReferenceMinter::new(),
            last_attempt: None,
        }
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    pub fn details(&self) -> &CustomerDetails {
        &self.details
    }

    pub fn promo(&self) -> Option<&PromoDescriptor> {
        self.promo.as_ref()
    }

    /// The most recent settlement attempt, successful or not.
    pub fn last_attempt(&self) -> Option<&SettlementAttempt> {
        self.last_attempt.as_ref()
    }

    /// Record the form. The details are kept even when they fail validation.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::AlreadyProcessing`] while a settlement is in
    /// flight, or [`CheckoutError::Validation`] naming the first invalid field.
    pub fn submit_details(&mut self, details: CustomerDetails) -> Result<(), CheckoutError> {
        self.begin_editing()?;

        self.details = details;
        self.details.validate()?;

        Ok(())
    }

    /// Validate `code` with the promo authority and hold the result.
    ///
    /// Surrounding whitespace is trimmed before the code is sent. A rejected
    /// code clears any promo held before.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Promo`] when the code is rejected.
    #[tracing::instrument(name = "checkout.orchestrator.apply_promo", skip(self), err)]
    pub async fn apply_promo(&mut self, code: &str) -> Result<&PromoDescriptor, CheckoutError> {
        self.begin_editing()?;

        match self.promos.validate(code.trim()).await {
            Ok(descriptor) => {
                self.transition(CheckoutEvent::PromoAccepted)?;

                info!(code = %descriptor.code, discount = %descriptor.discount, "applied promo");

                let descriptor: &PromoDescriptor = self.promo.insert(descriptor);

                Ok(descriptor)
            }
            Err(error) => {
                self.promo = None;
                self.transition(CheckoutEvent::PromoRejected)?;

                warn!(%error, "promo code rejected");

                Err(error.into())
            }
        }
    }

    /// Drop the held promo, if any.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::AlreadyProcessing`] while a settlement is in flight.
    pub fn remove_promo(&mut self) -> Result<Option<PromoDescriptor>, CheckoutError> {
        self.begin_editing()?;

        let removed = self.promo.take();

        if removed.is_some() {
            self.transition(CheckoutEvent::PromoRemoved)?;
        }

        Ok(removed)
    }

    /// Current totals for the cart, delivery fee and held promo.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] if the cart is not hydrated or the totals
    /// cannot be computed.
    pub fn totals(&self) -> Result<CheckoutTotals, CheckoutError> {
        let subtotal = self.cart.total_price()?;

        Ok(CheckoutTotals::compute(
            subtotal,
            self.settings.delivery_fee,
            self.promo.as_ref().map(|promo| &promo.discount),
        )?)
    }

    /// Charge the customer and record the order.
    ///
    /// The gateway is opened with a freshly minted reference. On success the
    /// order is created, then the backend is asked to verify the payment, and
    /// only after verification is the cart cleared. Any failure leaves the cart
    /// untouched and the session in [`CheckoutState::Failed`], including when
    /// the returned future is dropped before it resolves.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] describing the first failing step.
    #[tracing::instrument(
        name = "checkout.orchestrator.settle",
        skip(self),
        fields(
            reference = tracing::field::Empty,
            final_amount = tracing::field::Empty,
            order_id = tracing::field::Empty
        ),
        err
    )]
    pub async fn settle(&mut self) -> Result<Settlement, CheckoutError> {
        self.begin_editing()?;

        let cart = self.cart.cart()?;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let public_key = self
            .settings
            .public_key
            .clone()
            .ok_or(CheckoutError::GatewayNotConfigured)?;

        self.details.validate()?;

        let context = CheckoutContext::new(
            self.details.trimmed(),
            cart,
            self.settings.delivery_fee,
            self.promo.clone(),
        )?;

        let reference = self.minter.mint();

        let span = Span::current();

        span.record("reference", tracing::field::display(&reference));
        span.record(
            "final_amount",
            tracing::field::display(context.totals.final_amount),
        );

        self.transition(CheckoutEvent::GatewayOpened)?;

        let mut in_flight = InFlight {
            session: &mut *self,
            attempt: SettlementAttempt::initiate(reference.clone()),
            armed: true,
        };

        let result = in_flight
            .session
            .run(&context, public_key, &mut in_flight.attempt)
            .await;

        let mut attempt = in_flight.disarm();

        match result {
            Ok(order_id) => {
                span.record("order_id", tracing::field::display(&order_id));

                self.last_attempt = Some(attempt);

                if let Err(error) = self.cart.clear() {
                    warn!(%error, "payment verified but the cart could not be cleared");
                }

                info!(%order_id, "checkout settled");

                Ok(Settlement {
                    route: Route::Confirmation {
                        order_id: order_id.clone(),
                    },
                    order_id,
                    reference,
                    totals: context.totals,
                    notice: Notice::success(
                        "Order placed successfully!",
                        "Thank you for your order. We'll send you a confirmation email shortly.",
                    ),
                })
            }
            Err(error) => {
                let event = if matches!(error, CheckoutError::PaymentCancelled) {
                    CheckoutEvent::GatewayClosed
                } else {
                    CheckoutEvent::StepFailed
                };

                if let Err(transition) = self.transition(event) {
                    warn!(%transition, "unexpected state after failed settlement");

                    self.state = CheckoutState::Failed;
                }

                if let Err(settlement) = attempt.fail(error.to_string()) {
                    warn!(%settlement, "could not record failed attempt");
                }

                self.last_attempt = Some(attempt);

                warn!(%error, "checkout failed, cart kept");

                Err(error)
            }
        }
    }

    async fn run(
        &mut self,
        context: &CheckoutContext,
        public_key: String,
        attempt: &mut SettlementAttempt,
    ) -> Result<OrderId, CheckoutError> {
        let reference = attempt.reference().clone();
        let charge = charge_request(context, public_key, reference.clone());

        match self.gateway.collect(charge).await? {
            GatewayOutcome::Closed => return Err(CheckoutError::PaymentCancelled),
            GatewayOutcome::Success { reference: found } if found != reference => {
                return Err(GatewayError::ReferenceMismatch {
                    expected: reference,
                    found,
                }
                .into());
            }
            GatewayOutcome::Success { .. } => {}
        }

        self.transition(CheckoutEvent::GatewaySucceeded)?;

        let order = NewOrder::from_checkout(context, &reference);
        let receipt = self
            .orders
            .create_order(order)
            .await
            .map_err(|error| CheckoutError::OrderCreation(error.detail_or(ORDER_CREATION_FAILED)))?;

        attempt.order_created(receipt.id.clone())?;
        self.transition(CheckoutEvent::OrderCreated)?;

        self.orders
            .verify_payment(&reference)
            .await
            .map_err(|error| CheckoutError::Verification(error.detail_or(VERIFICATION_FAILED)))?;

        attempt.verified()?;
        self.transition(CheckoutEvent::PaymentVerified)?;

        Ok(receipt.id)
    }

    /// Refuse while processing; otherwise return a finished session to
    /// collecting details, keeping the held promo.
    fn begin_editing(&mut self) -> Result<(), CheckoutError> {
        if self.state.is_processing() {
            return Err(CheckoutError::AlreadyProcessing);
        }

        if matches!(self.state, CheckoutState::Failed | CheckoutState::Settled) {
            self.transition(CheckoutEvent::Reset)?;

            if self.promo.is_some() {
                self.transition(CheckoutEvent::PromoAccepted)?;
            }
        }

        Ok(())
    }

    fn transition(&mut self, event: CheckoutEvent) -> Result<(), CheckoutError> {
        let next = self.state.apply(event)?;

        info!(from = %self.state, to = %next, ?event, "checkout transition");

        self.state = next;

        Ok(())
    }
}

/// Holds a settlement between opening the gateway and its outcome.
///
/// If the `settle` future is dropped first, the session fails and the attempt
/// is recorded as abandoned, so the next call can start over.
struct InFlight<'a> {
    session: &'a mut CheckoutOrchestrator,
    attempt: SettlementAttempt,
    armed: bool,
}

impl InFlight<'_> {
    fn disarm(mut self) -> SettlementAttempt {
        self.armed = false;

        self.attempt.clone()
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        warn!(
            reference = %self.attempt.reference(),
            state = %self.session.state,
            "settlement dropped before it resolved"
        );

        if self.session.transition(CheckoutEvent::StepFailed).is_err() {
            self.session.state = CheckoutState::Failed;
        }

        if let Err(error) = self.attempt.fail(SETTLEMENT_ABANDONED) {
            warn!(%error, "could not record abandoned attempt");
        }

        self.session.last_attempt = Some(self.attempt.clone());
    }
}

fn charge_request(
    context: &CheckoutContext,
    public_key: String,
    reference: GatewayReference,
) -> ChargeRequest {
    let customer = &context.customer;

    ChargeRequest {
        email: customer.email.clone(),
        amount_minor: context.totals.final_amount_minor(),
        public_key,
        currency: context
            .totals
            .final_amount
            .currency()
            .iso_alpha_code
            .to_string(),
        reference,
        metadata: ChargeMetadata {
            delivery_address: customer.address.clone(),
            customer_name: customer.name.clone(),
            phone: customer.phone.clone(),
        },
    }
}
