use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{
    AggregateProduct, Category, CategoryTree, CreateCategory, CreateProduct, FileRecord, Product,
    RegisterFile, UpdateCategory, UpdateProduct, UpdateVariant, Variant,
};
use crate::pagination::{Page, PageRequest};

/// Persistence for the product graph.
///
/// Every write runs in one store transaction: it either lands completely or
/// not at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product with all of its child rows
    async fn create(&self, input: CreateProduct) -> CatalogResult<AggregateProduct>;

    /// Partial update; present collections are replaced
    async fn update(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product>;

    async fn update_variant(&self, id: Uuid, input: UpdateVariant) -> CatalogResult<Variant>;

    async fn get_aggregate(&self, id: Uuid) -> CatalogResult<AggregateProduct>;

    /// Newest first, with the total count of live products
    async fn list_aggregates(&self, request: PageRequest) -> CatalogResult<Page<AggregateProduct>>;

    /// Soft delete; an already deleted product is `RecordNotFound`
    async fn mark_deleted(&self, id: Uuid) -> CatalogResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, input: CreateCategory) -> CatalogResult<Category>;

    /// Live categories nested by parent
    async fn list_tree(&self) -> CatalogResult<Vec<CategoryTree>>;

    async fn update(&self, id: Uuid, input: UpdateCategory) -> CatalogResult<Category>;

    async fn mark_deleted(&self, id: Uuid) -> CatalogResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn register(&self, input: RegisterFile) -> CatalogResult<FileRecord>;

    async fn get(&self, id: Uuid) -> CatalogResult<FileRecord>;
}
