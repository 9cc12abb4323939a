//! Orders Service

use async_trait::async_trait;
use crumb::checkout::{GatewayReference, OrderId};
use mockall::automock;
use tracing::{Span, info};

use crate::{
    api::ApiClient,
    domain::orders::{
        OrdersServiceError,
        models::{NewOrder, OrderReceipt, OrderRecord},
    },
};

#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    api: ApiClient,
}

impl HttpOrdersService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    #[tracing::instrument(
        name = "orders.service.create_order",
        skip(self, order),
        fields(
            reference = %order.payment_reference,
            item_count = order.items.len(),
            order_id = tracing::field::Empty
        ),
        err
    )]
    async fn create_order(&self, order: NewOrder) -> Result<OrderReceipt, OrdersServiceError> {
        let receipt: OrderReceipt = self.api.post("/orders", &order).await?;

        Span::current().record("order_id", tracing::field::display(&receipt.id));

        info!(order_id = %receipt.id, "created order");

        Ok(receipt)
    }

    #[tracing::instrument(
        name = "orders.service.verify_payment",
        skip(self),
        fields(reference = %reference),
        err
    )]
    async fn verify_payment(&self, reference: &GatewayReference) -> Result<(), OrdersServiceError> {
        self.api
            .post_empty(&format!("/verify-payment/{reference}"))
            .await?;

        info!("verified payment");

        Ok(())
    }

    #[tracing::instrument(
        name = "orders.service.get_order",
        skip(self),
        fields(order_id = %id),
        err
    )]
    async fn get_order(&self, id: &OrderId) -> Result<OrderRecord, OrdersServiceError> {
        Ok(self.api.get(&format!("/orders/{id}")).await?)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Record a pending order tied to a payment reference.
    async fn create_order(&self, order: NewOrder) -> Result<OrderReceipt, OrdersServiceError>;

    /// Ask the backend to confirm the payment behind `reference` with the gateway.
    async fn verify_payment(&self, reference: &GatewayReference) -> Result<(), OrdersServiceError>;

    async fn get_order(&self, id: &OrderId) -> Result<OrderRecord, OrdersServiceError>;
}
