use observability::CatalogMetrics;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::instrument;
use uuid::Uuid;

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    AggregateProduct, Category, CategoryTree, CreateCategory, CreateProduct, FileRecord, Product,
    RegisterFile, UpdateCategory, UpdateProduct, UpdateVariant, Variant,
};
use crate::pagination::{Page, PageRequest};
use crate::repository::{CategoryRepository, FileRepository, ProductRepository};

#[derive(Clone, Copy, Debug)]
enum Access {
    Read,
    Write,
}

/// Run one repository call under the operation timeout and record its metrics.
///
/// On timeout the call's future is dropped, which rolls back any open
/// transaction.
async fn run_bounded<T, F>(
    timeout: Duration,
    operation: &'static str,
    access: Access,
    call: F,
) -> CatalogResult<T>
where
    F: Future<Output = CatalogResult<T>>,
{
    let started = Instant::now();
    let result = tokio::time::timeout(timeout, call)
        .await
        .unwrap_or(Err(CatalogError::Timeout(timeout)));
    let elapsed = started.elapsed().as_secs_f64();

    match access {
        Access::Read => CatalogMetrics::record_read(operation, elapsed),
        Access::Write => CatalogMetrics::record_write(operation, result.is_ok(), elapsed),
    }
    if let Err(err) = &result {
        CatalogMetrics::record_error(err.kind().as_str());
    }

    result
}

/// Entry point for product operations
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    config: CatalogConfig,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R, config: CatalogConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            config,
        }
    }

    #[instrument(skip(self, input), fields(product_title = %input.title))]
    pub async fn create_product(&self, input: CreateProduct) -> CatalogResult<AggregateProduct> {
        run_bounded(
            self.config.operation_timeout,
            "create_product",
            Access::Write,
            self.repository.create(input),
        )
        .await
    }

    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product> {
        run_bounded(
            self.config.operation_timeout,
            "update_product",
            Access::Write,
            self.repository.update(id, input),
        )
        .await
    }

    #[instrument(skip(self, input), fields(variant_id = %id))]
    pub async fn update_variant(&self, id: Uuid, input: UpdateVariant) -> CatalogResult<Variant> {
        run_bounded(
            self.config.operation_timeout,
            "update_variant",
            Access::Write,
            self.repository.update_variant(id, input),
        )
        .await
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: Uuid) -> CatalogResult<AggregateProduct> {
        run_bounded(
            self.config.operation_timeout,
            "get_product",
            Access::Read,
            self.repository.get_aggregate(id),
        )
        .await
    }

    /// List live products, newest first. Out-of-range paging is normalized.
    #[instrument(skip(self))]
    pub async fn list_products(&self, request: PageRequest) -> CatalogResult<Page<AggregateProduct>> {
        let request = request.normalize(self.config.default_page_size, self.config.max_page_size);
        let page = run_bounded(
            self.config.operation_timeout,
            "list_products",
            Access::Read,
            self.repository.list_aggregates(request),
        )
        .await?;

        CatalogMetrics::record_listing(page.items.len(), page.total_count);
        Ok(page)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: Uuid) -> CatalogResult<()> {
        run_bounded(
            self.config.operation_timeout,
            "delete_product",
            Access::Write,
            self.repository.mark_deleted(id),
        )
        .await
    }
}

#[derive(Clone)]
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
    config: CatalogConfig,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R, config: CatalogConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            config,
        }
    }

    #[instrument(skip(self, input), fields(category_name = %input.name))]
    pub async fn create_category(&self, input: CreateCategory) -> CatalogResult<Category> {
        run_bounded(
            self.config.operation_timeout,
            "create_category",
            Access::Write,
            self.repository.create(input),
        )
        .await
    }

    pub async fn list_categories(&self) -> CatalogResult<Vec<CategoryTree>> {
        run_bounded(
            self.config.operation_timeout,
            "list_categories",
            Access::Read,
            self.repository.list_tree(),
        )
        .await
    }

    #[instrument(skip(self, input), fields(category_id = %id))]
    pub async fn update_category(&self, id: Uuid, input: UpdateCategory) -> CatalogResult<Category> {
        run_bounded(
            self.config.operation_timeout,
            "update_category",
            Access::Write,
            self.repository.update(id, input),
        )
        .await
    }

    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&self, id: Uuid) -> CatalogResult<()> {
        run_bounded(
            self.config.operation_timeout,
            "delete_category",
            Access::Write,
            self.repository.mark_deleted(id),
        )
        .await
    }
}

#[derive(Clone)]
pub struct FileService<R: FileRepository> {
    repository: Arc<R>,
    config: CatalogConfig,
}

impl<R: FileRepository> FileService<R> {
    pub fn new(repository: R, config: CatalogConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            config,
        }
    }

    #[instrument(skip(self, input), fields(file_name = %input.original_name))]
    pub async fn register_file(&self, input: RegisterFile) -> CatalogResult<FileRecord> {
        run_bounded(
            self.config.operation_timeout,
            "register_file",
            Access::Write,
            self.repository.register(input),
        )
        .await
    }

    #[instrument(skip(self), fields(file_id = %id))]
    pub async fn get_file(&self, id: Uuid) -> CatalogResult<FileRecord> {
        run_bounded(
            self.config.operation_timeout,
            "get_file",
            Access::Read,
            self.repository.get(id),
        )
        .await
    }
}
