use async_trait::async_trait;
use database::postgres::with_transaction;
use sea_orm::DatabaseConnection;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    categories,
    error::{CatalogError, CatalogResult},
    models::{
        AggregateProduct, Category, CategoryTree, CreateCategory, CreateProduct, FileRecord,
        Product, RegisterFile, UpdateCategory, UpdateProduct, UpdateVariant, Variant,
    },
    pagination::{Page, PageRequest},
    reader,
    repository::{CategoryRepository, FileRepository, ProductRepository},
    tables, writer,
};

fn log_rollback(operation: &'static str, err: &CatalogError) {
    warn!(operation, kind = err.kind().as_str(), error = %err, "Catalog write rolled back");
}

#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> CatalogResult<AggregateProduct> {
        let product = with_transaction(&self.db, move |txn| {
            Box::pin(async move { writer::create_product(txn, &input).await })
        })
        .await
        .inspect_err(|err| log_rollback("create_product", err))?;

        info!(product_id = %product.id, variants = product.variants.len(), "Created product");
        Ok(product)
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product> {
        let product = with_transaction(&self.db, move |txn| {
            Box::pin(async move { writer::update_product(txn, id, &input).await })
        })
        .await
        .inspect_err(|err| log_rollback("update_product", err))?;

        info!(product_id = %id, "Updated product");
        Ok(product)
    }

    async fn update_variant(&self, id: Uuid, input: UpdateVariant) -> CatalogResult<Variant> {
        let variant = with_transaction(&self.db, move |txn| {
            Box::pin(async move { writer::update_variant(txn, id, &input).await })
        })
        .await
        .inspect_err(|err| log_rollback("update_variant", err))?;

        info!(variant_id = %id, product_id = %variant.product_id, "Updated variant");
        Ok(variant)
    }

    async fn get_aggregate(&self, id: Uuid) -> CatalogResult<AggregateProduct> {
        reader::get_aggregate(&self.db, id).await
    }

    async fn list_aggregates(&self, request: PageRequest) -> CatalogResult<Page<AggregateProduct>> {
        reader::list_aggregates(&self.db, request).await
    }

    async fn mark_deleted(&self, id: Uuid) -> CatalogResult<()> {
        tables::product::mark_deleted(&self.db, id).await?;

        info!(product_id = %id, "Marked product as deleted");
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgCategoryRepository {
    db: DatabaseConnection,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, input: CreateCategory) -> CatalogResult<Category> {
        let category = with_transaction(&self.db, move |txn| {
            Box::pin(async move { categories::create_category(txn, &input).await })
        })
        .await
        .inspect_err(|err| log_rollback("create_category", err))?;

        info!(category_id = %category.id, "Created category");
        Ok(category)
    }

    async fn list_tree(&self) -> CatalogResult<Vec<CategoryTree>> {
        categories::list_tree(&self.db).await
    }

    async fn update(&self, id: Uuid, input: UpdateCategory) -> CatalogResult<Category> {
        let category = with_transaction(&self.db, move |txn| {
            Box::pin(async move { categories::update_category(txn, id, &input).await })
        })
        .await
        .inspect_err(|err| log_rollback("update_category", err))?;

        info!(category_id = %id, "Updated category");
        Ok(category)
    }

    async fn mark_deleted(&self, id: Uuid) -> CatalogResult<()> {
        tables::category::mark_deleted(&self.db, id).await?;

        info!(category_id = %id, "Marked category as deleted");
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgFileRepository {
    db: DatabaseConnection,
}

impl PgFileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn register(&self, input: RegisterFile) -> CatalogResult<FileRecord> {
        let file = tables::file::insert(&self.db, &input).await?;

        info!(file_id = %file.id, "Registered file");
        Ok(file)
    }

    async fn get(&self, id: Uuid) -> CatalogResult<FileRecord> {
        tables::file::find_by_id(&self.db, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_failed_update_rolls_back() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<crate::entity::product::Model>::new()])
            .into_connection();
        let repository = PgProductRepository::new(db.clone());

        let result = repository.update(Uuid::now_v7(), UpdateProduct::default()).await;

        assert!(matches!(result, Err(CatalogError::RecordNotFound)));
        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("BEGIN"));
        assert!(log.contains("ROLLBACK"));
        assert!(!log.contains("COMMIT"));
    }
}
