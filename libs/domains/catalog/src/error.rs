use database::postgres::DbErr;
use std::time::Duration;
use thiserror::Error;

/// Coarse classification callers match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The addressed product, variant, category or file does not exist (or is soft-deleted).
    NotFound,
    /// The write would duplicate a row that must be unique.
    Conflict,
    /// The input points at a category, file or option that cannot be used.
    InvalidReference,
    /// Unexpected store failure or timeout.
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::InvalidReference => "invalid_reference",
            ErrorKind::Internal => "internal",
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("record not found")]
    RecordNotFound,

    #[error("product category not found")]
    ProductCategoryNotFound,

    #[error("parent product category not found")]
    ParentProductCategoryNotFound,

    #[error("invalid product category")]
    InvalidProductCategory,

    #[error("file not found")]
    FileNotFound,

    #[error("product option not found")]
    ProductOptionNotFound,

    #[error("variant #{variant} option value #{position} does not match a product option")]
    UnresolvedVariantOption { variant: usize, position: usize },

    #[error("duplicated product option")]
    DuplicatedProductOption,

    #[error("duplicated product category for same product")]
    DuplicatedProductCategoryForProduct,

    #[error("duplicated image for same product")]
    DuplicatedProductImage,

    #[error("duplicated option value for same variant")]
    DuplicatedVariantOptionValue,

    #[error("operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to {step}: {source}")]
    Database {
        step: &'static str,
        #[source]
        source: DbErr,
    },
}

impl CatalogError {
    /// Wrap an untranslated store failure with the step that hit it.
    pub fn database(step: &'static str, source: DbErr) -> Self {
        CatalogError::Database { step, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::RecordNotFound => ErrorKind::NotFound,
            CatalogError::ProductCategoryNotFound
            | CatalogError::ParentProductCategoryNotFound
            | CatalogError::InvalidProductCategory
            | CatalogError::FileNotFound
            | CatalogError::ProductOptionNotFound
            | CatalogError::UnresolvedVariantOption { .. } => ErrorKind::InvalidReference,
            CatalogError::DuplicatedProductOption
            | CatalogError::DuplicatedProductCategoryForProduct
            | CatalogError::DuplicatedProductImage
            | CatalogError::DuplicatedVariantOptionValue => ErrorKind::Conflict,
            CatalogError::Timeout(_) | CatalogError::Database { .. } => ErrorKind::Internal,
        }
    }

    /// Whether the caller can fix the request and try again.
    pub fn is_client_error(&self) -> bool {
        self.kind() != ErrorKind::Internal
    }

    /// Message safe to show outside the service. Internal failures never
    /// expose store error text.
    pub fn public_message(&self) -> String {
        if self.is_client_error() {
            self.to_string()
        } else {
            "internal error".to_string()
        }
    }
}

/// Begin and commit failures of [`database::postgres::with_transaction`].
impl From<DbErr> for CatalogError {
    fn from(source: DbErr) -> Self {
        CatalogError::Database {
            step: "complete transaction",
            source,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
