//! Product catalog domain
//!
//! Writes whole product graphs atomically and reads them back as nested
//! aggregates with a fixed number of queries per call.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← timeouts, paging defaults, metrics
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + Postgres implementation, one transaction per write
//! └──────┬──────┘
//!        │
//! ┌──────▼──────────────────────┐
//! │ Writer / Reader / Aggregate │  ← multi-table sequences, batched fan-out, stitching
//! └──────┬──────────────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Tables    │  ← one CRUD surface per table, constraint translation
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{Catalog, CatalogConfig, PageRequest};
//! # async fn run(db: sea_orm::DatabaseConnection) -> domain_catalog::CatalogResult<()> {
//! let catalog = Catalog::new(db, CatalogConfig::default());
//!
//! let page = catalog.products.list_products(PageRequest::new(1, 20)).await?;
//! println!("{} of {} products", page.items.len(), page.total_count);
//! # Ok(())
//! # }
//! ```

mod aggregate;
mod categories;
pub mod config;
mod constraints;
pub mod entity;
pub mod error;
pub mod models;
pub mod pagination;
pub mod postgres;
mod reader;
pub mod repository;
pub mod service;
mod tables;
mod writer;

pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult, ErrorKind};
pub use models::{
    AggregateProduct, AggregateVariant, Category, CategorySummary, CategoryTree, CreateCategory,
    CreateProduct, CreateVariant, FileRecord, OptionValueInput, Price, PriceInput, Product,
    ProductImage, ProductOption, ProductStatus, RegisterFile, UpdateCategory, UpdateProduct,
    UpdateVariant, Variant, VariantOptionInput, VariantOptionValue,
};
pub use pagination::{Page, PageRequest};
pub use postgres::{PgCategoryRepository, PgFileRepository, PgProductRepository};
pub use repository::{CategoryRepository, FileRepository, ProductRepository};
pub use service::{CategoryService, FileService, ProductService};

use sea_orm::DatabaseConnection;

/// Services wired to one Postgres connection pool.
#[derive(Clone)]
pub struct Catalog {
    pub products: ProductService<PgProductRepository>,
    pub categories: CategoryService<PgCategoryRepository>,
    pub files: FileService<PgFileRepository>,
}

impl Catalog {
    pub fn new(db: DatabaseConnection, config: CatalogConfig) -> Self {
        Self {
            products: ProductService::new(PgProductRepository::new(db.clone()), config.clone()),
            categories: CategoryService::new(PgCategoryRepository::new(db.clone()), config.clone()),
            files: FileService::new(PgFileRepository::new(db), config),
        }
    }
}
