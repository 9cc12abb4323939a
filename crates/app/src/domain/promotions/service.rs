//! Promotions Service

use async_trait::async_trait;
use crumb::promotions::PromoDescriptor;
use mockall::automock;
use rusty_money::iso::Currency;
use tracing::{Span, info};

use crate::{
    api::ApiClient,
    domain::promotions::{
        PromoServiceError,
        models::{PromoValidated, PromoValidation},
    },
};

#[derive(Debug, Clone)]
pub struct HttpPromoService {
    api: ApiClient,
    currency: &'static Currency,
}

impl HttpPromoService {
    #[must_use]
    pub fn new(api: ApiClient, currency: &'static Currency) -> Self {
        Self { api, currency }
    }
}

#[async_trait]
impl PromoService for HttpPromoService {
    #[tracing::instrument(
        name = "promotions.service.validate",
        skip(self),
        fields(discount = tracing::field::Empty),
        err
    )]
    async fn validate(&self, code: &str) -> Result<PromoDescriptor, PromoServiceError> {
        if code.is_empty() {
            return Err(PromoServiceError::EmptyCode);
        }

        let validated: PromoValidated = self
            .api
            .post("/promo/validate", &PromoValidation { code })
            .await?;

        let descriptor =
            PromoDescriptor::from_raw(validated.code, &validated.discount, self.currency)?;

        Span::current().record("discount", tracing::field::display(&descriptor.discount));

        info!(code = %descriptor.code, "accepted promo code");

        Ok(descriptor)
    }
}

#[automock]
#[async_trait]
pub trait PromoService: Send + Sync {
    /// Ask the promo authority whether `code` is valid.
    ///
    /// The code is sent exactly as given; trimming is the caller's job.
    async fn validate(&self, code: &str) -> Result<PromoDescriptor, PromoServiceError>;
}

#[cfg(test)]
mod tests {
    use crumb::promotions::PromoDiscount;
    use rusty_money::{Money, iso::NGN};
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        Mock, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    use super::*;
    use crate::{domain::promotions::INVALID_PROMO_MESSAGE, test::TestContext};

    #[tokio::test]
    async fn percentage_code_is_accepted() -> TestResult {
        let ctx = TestContext::new().await?;
        let promos = HttpPromoService::new(ctx.api.clone(), NGN);

        Mock::given(method("POST"))
            .and(path("/promo/validate"))
            .and(body_json(json!({ "code": "BREAD10" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "code": "BREAD10", "discount": "10%" })),
            )
            .expect(1)
            .mount(&ctx.server)
            .await;

        let descriptor = promos.validate("BREAD10").await?;

        assert_eq!(descriptor.code, "BREAD10");
        assert!(descriptor.discount.is_percentage());

        Ok(())
    }

    #[tokio::test]
    async fn numeric_discount_is_fixed() -> TestResult {
        let ctx = TestContext::new().await?;
        let promos = HttpPromoService::new(ctx.api.clone(), NGN);

        Mock::given(method("POST"))
            .and(path("/promo/validate"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "code": "BIG", "discount": 50 })),
            )
            .mount(&ctx.server)
            .await;

        let descriptor = promos.validate("BIG").await?;

        assert!(matches!(
            descriptor.discount,
            PromoDiscount::Fixed(amount) if amount == Money::from_minor(5000, NGN)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn rejection_surfaces_backend_detail() -> TestResult {
        let ctx = TestContext::new().await?;
        let promos = HttpPromoService::new(ctx.api.clone(), NGN);

        Mock::given(method("POST"))
            .and(path("/promo/validate"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "detail": "Promo code expired" })),
            )
            .mount(&ctx.server)
            .await;

        let result = promos.validate("OLD").await;

        assert!(matches!(
            result,
            Err(PromoServiceError::Rejected(ref message)) if message == "Promo code expired"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn rejection_without_detail_uses_fallback() -> TestResult {
        let ctx = TestContext::new().await?;
        let promos = HttpPromoService::new(ctx.api.clone(), NGN);

        Mock::given(method("POST"))
            .and(path("/promo/validate"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&ctx.server)
            .await;

        let result = promos.validate("NOPE").await;

        assert!(matches!(
            result,
            Err(PromoServiceError::Rejected(ref message)) if message == INVALID_PROMO_MESSAGE
        ));

        Ok(())
    }

    #[tokio::test]
    async fn out_of_range_percentage_is_invalid() -> TestResult {
        let ctx = TestContext::new().await?;
        let promos = HttpPromoService::new(ctx.api.clone(), NGN);

        Mock::given(method("POST"))
            .and(path("/promo/validate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "code": "TOO_MUCH", "discount": "150%" })),
            )
            .mount(&ctx.server)
            .await;

        let result = promos.validate("TOO_MUCH").await;

        assert!(matches!(result, Err(PromoServiceError::InvalidDiscount(_))));

        Ok(())
    }

    #[tokio::test]
    async fn empty_code_makes_no_request() -> TestResult {
        let ctx = TestContext::new().await?;
        let promos = HttpPromoService::new(ctx.api.clone(), NGN);

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&ctx.server)
            .await;

        let result = promos.validate("").await;

        assert!(matches!(result, Err(PromoServiceError::EmptyCode)));

        Ok(())
    }
}
