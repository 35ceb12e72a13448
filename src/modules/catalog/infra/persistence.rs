use async_trait::async_trait;
use sea_orm::*;
use std::sync::Arc;

use crate::modules::catalog::entities::{category, product, sub_category};
use crate::modules::catalog::repository::{CategoryRepository, ProductRepository};
use crate::shared::error::{AppError, AppResult};
use crate::shared::infra::memory::MemoryStore;

// =========================================================================
// Postgres Implementation
// =========================================================================

pub struct PostgresCategoryRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresCategoryRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_all(&self) -> AppResult<Vec<category::Model>> {
        category::Entity::find()
            .filter(category::Column::Deleted.eq(false))
            .order_by_asc(category::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<category::Model>> {
        category::Entity::find_by_id(id)
            .filter(category::Column::Deleted.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<category::Model>> {
        category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .filter(category::Column::Deleted.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn insert(&self, category: category::Model) -> AppResult<category::Model> {
        let mut active = category.into_active_model();
        active.id = NotSet;
        active
            .insert(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn update(&self, category: category::Model) -> AppResult<category::Model> {
        category
            .into_active_model()
            .reset_all()
            .update(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn find_subs_by_category(
        &self,
        category_id: i32,
    ) -> AppResult<Vec<sub_category::Model>> {
        sub_category::Entity::find()
            .filter(sub_category::Column::CategoryId.eq(category_id))
            .filter(sub_category::Column::Deleted.eq(false))
            .order_by_asc(sub_category::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn find_sub_by_name(
        &self,
        category_id: i32,
        name: &str,
    ) -> AppResult<Option<sub_category::Model>> {
        sub_category::Entity::find()
            .filter(sub_category::Column::CategoryId.eq(category_id))
            .filter(sub_category::Column::Name.eq(name))
            .filter(sub_category::Column::Deleted.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn insert_sub(&self, sub: sub_category::Model) -> AppResult<sub_category::Model> {
        let mut active = sub.into_active_model();
        active.id = NotSet;
        active
            .insert(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }
}

pub struct PostgresProductRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresProductRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<product::Model>> {
        product::Entity::find_by_id(id)
            .filter(product::Column::Deleted.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn find_page(&self, page: u64, per_page: u64) -> AppResult<Vec<product::Model>> {
        product::Entity::find()
            .filter(product::Column::Deleted.eq(false))
            .order_by_asc(product::Column::Id)
            .paginate(self.db.as_ref(), per_page)
            .fetch_page(page)
            .await
            .map_err(AppError::DbError)
    }

    async fn insert(&self, product: product::Model) -> AppResult<product::Model> {
        let mut active = product.into_active_model();
        active.id = NotSet;
        active
            .insert(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }

    async fn update(&self, product: product::Model) -> AppResult<product::Model> {
        product
            .into_active_model()
            .reset_all()
            .update(self.db.as_ref())
            .await
            .map_err(AppError::DbError)
    }
}

// =========================================================================
// InMemory Implementation
// =========================================================================

#[derive(Clone)]
pub struct InMemoryCategoryRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryCategoryRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_all(&self) -> AppResult<Vec<category::Model>> {
        let categories = self.store.categories.lock().unwrap();
        let mut all: Vec<_> = categories.values().filter(|c| !c.deleted).cloned().collect();
        all.sort_by_key(|c| c.id);
        Ok(all)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<category::Model>> {
        let categories = self.store.categories.lock().unwrap();
        Ok(categories.get(&id).filter(|c| !c.deleted).cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<category::Model>> {
        let categories = self.store.categories.lock().unwrap();
        Ok(categories
            .values()
            .find(|c| c.name == name && !c.deleted)
            .cloned())
    }

    async fn insert(&self, mut category: category::Model) -> AppResult<category::Model> {
        category.id = self.store.next_id();
        let mut categories = self.store.categories.lock().unwrap();
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update(&self, category: category::Model) -> AppResult<category::Model> {
        let mut categories = self.store.categories.lock().unwrap();
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn find_subs_by_category(
        &self,
        category_id: i32,
    ) -> AppResult<Vec<sub_category::Model>> {
        let subs = self.store.sub_categories.lock().unwrap();
        let mut found: Vec<_> = subs
            .values()
            .filter(|s| s.category_id == category_id && !s.deleted)
            .cloned()
            .collect();
        found.sort_by_key(|s| s.id);
        Ok(found)
    }

    async fn find_sub_by_name(
        &self,
        category_id: i32,
        name: &str,
    ) -> AppResult<Option<sub_category::Model>> {
        let subs = self.store.sub_categories.lock().unwrap();
        Ok(subs
            .values()
            .find(|s| s.category_id == category_id && s.name == name && !s.deleted)
            .cloned())
    }

    async fn insert_sub(&self, mut sub: sub_category::Model) -> AppResult<sub_category::Model> {
        sub.id = self.store.next_id();
        let mut subs = self.store.sub_categories.lock().unwrap();
        subs.insert(sub.id, sub.clone());
        Ok(sub)
    }
}

#[derive(Clone)]
pub struct InMemoryProductRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryProductRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<product::Model>> {
        let products = self.store.products.lock().unwrap();
        Ok(products.get(&id).filter(|p| !p.deleted).cloned())
    }

    async fn find_page(&self, page: u64, per_page: u64) -> AppResult<Vec<product::Model>> {
        let products = self.store.products.lock().unwrap();
        let mut all: Vec<_> = products.values().filter(|p| !p.deleted).cloned().collect();
        all.sort_by_key(|p| p.id);
        Ok(all
            .into_iter()
            .skip((page * per_page) as usize)
            .take(per_page as usize)
            .collect())
    }

    async fn insert(&self, mut product: product::Model) -> AppResult<product::Model> {
        product.id = self.store.next_id();
        let mut products = self.store.products.lock().unwrap();
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, product: product::Model) -> AppResult<product::Model> {
        let mut products = self.store.products.lock().unwrap();
        products.insert(product.id, product.clone());
        Ok(product)
    }
}
