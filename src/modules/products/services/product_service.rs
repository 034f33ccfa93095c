use std::sync::Arc;

use crate::core::{AppError, Currency, Result, TenantRepository};
use crate::modules::documents::CreateLineItemRequest;
use crate::modules::products::models::{Product, ProductRequest, ProductResponse};

/// Service for product catalogue logic
pub struct ProductService {
    product_repo: Arc<dyn TenantRepository<Product>>,
    default_currency: Currency,
}

impl ProductService {
    pub fn new(product_repo: Arc<dyn TenantRepository<Product>>, default_currency: Currency) -> Self {
        Self {
            product_repo,
            default_currency,
        }
    }

    pub async fn create_product(
        &self,
        request: ProductRequest,
        tenant_id: &str,
    ) -> Result<ProductResponse> {
        let product = Product::new(request, tenant_id, self.default_currency)?;
        let created = self.product_repo.create(&product).await?;

        tracing::info!(product_id = %created.id, tenant_id, "Product created");
        Ok(created.into())
    }

    pub async fn get_product(&self, id: &str, tenant_id: &str) -> Result<ProductResponse> {
        self.find(id, tenant_id).await.map(Into::into)
    }

    pub async fn list_products(&self, tenant_id: &str) -> Result<Vec<ProductResponse>> {
        let products = self.product_repo.list(tenant_id).await?;
        Ok(products.into_iter().map(Into::into).collect())
    }

    pub async fn update_product(
        &self,
        id: &str,
        request: ProductRequest,
        tenant_id: &str,
    ) -> Result<ProductResponse> {
        let mut product = self.find(id, tenant_id).await?;
        product.apply(request)?;

        self.product_repo
            .update(&product)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::not_found("Product not found"))
    }

    pub async fn delete_product(&self, id: &str, tenant_id: &str) -> Result<()> {
        if !self.product_repo.delete(id, tenant_id).await? {
            return Err(AppError::not_found("Product not found"));
        }
        Ok(())
    }

    async fn find(&self, id: &str, tenant_id: &str) -> Result<Product> {
        self.product_repo
            .find_by_id(id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))
    }
}

/// Reject document lines that reference a product the tenant does not own
pub async fn ensure_line_products(
    product_repo: &dyn TenantRepository<Product>,
    items: &[CreateLineItemRequest],
    tenant_id: &str,
) -> Result<()> {
    for (idx, item) in items.iter().enumerate() {
        let Some(product_id) = item.product_id.as_deref() else {
            continue;
        };

        if product_repo.find_by_id(product_id, tenant_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Line item {}: product {} not found",
                idx, product_id
            )));
        }
    }
    Ok(())
}
