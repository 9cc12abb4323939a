//! Menu Service

use async_trait::async_trait;
use crumb::products::ProductId;
use mockall::automock;
use tracing::debug;

use crate::{
    api::ApiClient,
    domain::menu::{MenuServiceError, models::MenuItem},
};

#[derive(Debug, Clone)]
pub struct HttpMenuService {
    api: ApiClient,
}

impl HttpMenuService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl MenuService for HttpMenuService {
    #[tracing::instrument(name = "menu.service.list_items", skip(self), err)]
    async fn list_items(&self) -> Result<Vec<MenuItem>, MenuServiceError> {
        let items: Vec<MenuItem> = self.api.get("/menu/items").await?;

        debug!(count = items.len(), "listed menu items");

        Ok(items)
    }

    #[tracing::instrument(
        name = "menu.service.get_item",
        skip(self),
        fields(menu_item_id = %id),
        err
    )]
    async fn get_item(&self, id: ProductId) -> Result<MenuItem, MenuServiceError> {
        Ok(self.api.get(&format!("/menu/items/{id}")).await?)
    }
}

#[automock]
#[async_trait]
pub trait MenuService: Send + Sync {
    async fn list_items(&self) -> Result<Vec<MenuItem>, MenuServiceError>;

    async fn get_item(&self, id: ProductId) -> Result<MenuItem, MenuServiceError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        Mock, ResponseTemplate,
        matchers::{method, path},
    };

    use super::*;
    use crate::test::TestContext;

    #[tokio::test]
    async fn list_items_decodes_menu() -> TestResult {
        let ctx = TestContext::new().await?;
        let menu = HttpMenuService::new(ctx.api.clone());

        Mock::given(method("GET"))
            .and(path("/menu/items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "name": "Sourdough Loaf", "price": 12.99, "image": "/uploads/menu/sourdough.jpg" },
                { "id": 2, "name": "Butter Croissant", "price": 3.5 }
            ])))
            .mount(&ctx.server)
            .await;

        let items = menu.list_items().await?;

        assert_eq!(items.len(), 2);
        assert_eq!(
            items.iter().map(|item| item.id.get()).collect::<Vec<_>>(),
            vec![1, 2]
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_item_is_not_found() -> TestResult {
        let ctx = TestContext::new().await?;
        let menu = HttpMenuService::new(ctx.api.clone());

        Mock::given(method("GET"))
            .and(path("/menu/items/99"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found" })),
            )
            .mount(&ctx.server)
            .await;

        let result = menu.get_item(ProductId::new(99)).await;

        assert!(matches!(result, Err(MenuServiceError::NotFound)));

        Ok(())
    }
}
