use std::sync::Arc;

use rust_decimal::Decimal;

use super::entities::{category, product, sub_category};
use super::repository::{CategoryRepository, ProductRepository};
use crate::shared::audit;
use crate::shared::error::{AppError, AppResult};

/// Plain CRUD over the catalog; referenced by the cart workflow for stock
/// lookups but otherwise independent of the order chain.
pub struct CatalogService {
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CatalogService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            categories,
            products,
        }
    }

    pub async fn list_categories(&self) -> AppResult<Vec<category::Model>> {
        self.categories.find_all().await
    }

    pub async fn create_category(
        &self,
        actor: &str,
        name: String,
        description: Option<String>,
    ) -> AppResult<category::Model> {
        if self.categories.find_by_name(&name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Category '{}' already exists",
                name
            )));
        }

        let stamp = audit::stamp(actor);
        self.categories
            .insert(category::Model {
                id: 0,
                name,
                description,
                created_at: stamp.at,
                created_by: stamp.by.clone(),
                updated_at: stamp.at,
                updated_by: stamp.by,
                deleted: false,
            })
            .await
    }

    pub async fn update_category(
        &self,
        actor: &str,
        id: i32,
        name: String,
        description: Option<String>,
    ) -> AppResult<category::Model> {
        let mut existing = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if let Some(other) = self.categories.find_by_name(&name).await? {
            if other.id != id {
                return Err(AppError::Conflict(format!(
                    "Category '{}' already exists",
                    name
                )));
            }
        }

        let stamp = audit::stamp(actor);
        existing.name = name;
        existing.description = description;
        existing.updated_at = stamp.at;
        existing.updated_by = stamp.by;
        self.categories.update(existing).await
    }

    pub async fn delete_category(&self, actor: &str, id: i32) -> AppResult<()> {
        let mut existing = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        let stamp = audit::stamp(actor);
        existing.deleted = true;
        existing.updated_at = stamp.at;
        existing.updated_by = stamp.by;
        self.categories.update(existing).await?;
        Ok(())
    }

    pub async fn list_sub_categories(
        &self,
        category_id: i32,
    ) -> AppResult<Vec<sub_category::Model>> {
        self.categories
            .find_by_id(category_id)
            .await?
            .ok_or(AppError::NotFound)?;
        self.categories.find_subs_by_category(category_id).await
    }

    pub async fn create_sub_category(
        &self,
        actor: &str,
        category_id: i32,
        name: String,
        description: Option<String>,
    ) -> AppResult<sub_category::Model> {
        self.categories
            .find_by_id(category_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if self
            .categories
            .find_sub_by_name(category_id, &name)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Sub-category '{}' already exists",
                name
            )));
        }

        let stamp = audit::stamp(actor);
        self.categories
            .insert_sub(sub_category::Model {
                id: 0,
                category_id,
                name,
                description,
                created_at: stamp.at,
                created_by: stamp.by.clone(),
                updated_at: stamp.at,
                updated_by: stamp.by,
                deleted: false,
            })
            .await
    }

    pub async fn list_products(&self, page: u64, per_page: u64) -> AppResult<Vec<product::Model>> {
        self.products.find_page(page, per_page).await
    }

    pub async fn get_product(&self, id: i32) -> AppResult<product::Model> {
        self.products.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_product(
        &self,
        actor: &str,
        sub_category_id: Option<i32>,
        name: String,
        description: Option<String>,
        unit_price: Decimal,
        available_stock: i32,
    ) -> AppResult<product::Model> {
        if unit_price < Decimal::ZERO || available_stock < 0 {
            return Err(AppError::BadRequest(
                "price and stock must be non-negative".to_string(),
            ));
        }

        let stamp = audit::stamp(actor);
        self.products
            .insert(product::Model {
                id: 0,
                sub_category_id,
                name,
                description,
                unit_price,
                available_stock,
                created_at: stamp.at,
                created_by: stamp.by.clone(),
                updated_at: stamp.at,
                updated_by: stamp.by,
                deleted: false,
            })
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_product(
        &self,
        actor: &str,
        id: i32,
        name: String,
        description: Option<String>,
        unit_price: Decimal,
        available_stock: i32,
    ) -> AppResult<product::Model> {
        let mut existing = self
            .products
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if unit_price < Decimal::ZERO || available_stock < 0 {
            return Err(AppError::BadRequest(
                "price and stock must be non-negative".to_string(),
            ));
        }

        let stamp = audit::stamp(actor);
        existing.name = name;
        existing.description = description;
        existing.unit_price = unit_price;
        existing.available_stock = available_stock;
        existing.updated_at = stamp.at;
        existing.updated_by = stamp.by;
        self.products.update(existing).await
    }

    pub async fn delete_product(&self, actor: &str, id: i32) -> AppResult<()> {
        let mut existing = self
            .products
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        let stamp = audit::stamp(actor);
        existing.deleted = true;
        existing.updated_at = stamp.at;
        existing.updated_by = stamp.by;
        self.products.update(existing).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::infra::persistence::{
        InMemoryCategoryRepository, InMemoryProductRepository,
    };
    use crate::shared::infra::memory::MemoryStore;
    use rust_decimal_macros::dec;

    fn service() -> CatalogService {
        let store = Arc::new(MemoryStore::new());
        CatalogService::new(
            Arc::new(InMemoryCategoryRepository::new(store.clone())),
            Arc::new(InMemoryProductRepository::new(store)),
        )
    }

    #[tokio::test]
    async fn duplicate_category_name_conflicts() {
        let svc = service();
        svc.create_category("admin", "Books".to_string(), None)
            .await
            .unwrap();
        let err = svc
            .create_category("admin", "Books".to_string(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn soft_deleted_product_is_invisible() {
        let svc = service();
        let product = svc
            .create_product("admin", None, "Pen".to_string(), None, dec!(1.50), 10)
            .await
            .unwrap();
        svc.delete_product("admin", product.id).await.unwrap();
        assert!(matches!(
            svc.get_product(product.id).await,
            Err(AppError::NotFound)
        ));
        assert!(svc.list_products(0, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sub_category_requires_parent() {
        let svc = service();
        let err = svc
            .create_sub_category("admin", 99, "Fiction".to_string(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }
}
