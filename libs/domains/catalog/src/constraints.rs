//! Constraint violation → domain error tables, one per entity model.
//!
//! Every model maps the store failures it can provoke through its own
//! [`ConstraintTable`]. Rules match on the SQLSTATE class and, when given, the
//! constraint name declared in the migrations. Anything unmatched becomes
//! [`CatalogError::Database`] tagged with the failing step.

use crate::error::CatalogError;
use database::postgres::{ConstraintViolation, DbErr, ViolationKind};
use tracing::warn;

#[derive(Debug)]
pub(crate) struct ConstraintRule {
    pub kind: ViolationKind,
    /// `None` matches any constraint of `kind`.
    pub constraint: Option<&'static str>,
    pub error: fn() -> CatalogError,
}

#[derive(Debug)]
pub(crate) struct ConstraintTable {
    pub model: &'static str,
    pub rules: &'static [ConstraintRule],
}

impl ConstraintTable {
    pub fn lookup(&self, violation: &ConstraintViolation) -> Option<CatalogError> {
        self.rules
            .iter()
            .find(|rule| {
                rule.kind == violation.kind
                    && rule
                        .constraint
                        .is_none_or(|name| violation.constraint() == Some(name))
            })
            .map(|rule| (rule.error)())
    }

    /// Translate a failed statement of this model.
    pub fn translate(&self, step: &'static str, err: DbErr) -> CatalogError {
        let translated = ConstraintViolation::from_db_err(&err)
            .and_then(|violation| self.lookup(&violation).map(|e| (violation, e)));

        match translated {
            Some((violation, domain)) => {
                warn!(
                    model = self.model,
                    sqlstate = violation.kind.sqlstate(),
                    constraint = violation.constraint().unwrap_or("-"),
                    error = %domain,
                    "Translated constraint violation"
                );
                domain
            }
            None => CatalogError::database(step, err),
        }
    }
}

pub(crate) const PRODUCT: ConstraintTable = ConstraintTable {
    model: "product",
    rules: &[ConstraintRule {
        kind: ViolationKind::ForeignKey,
        constraint: Some("product_thumbnail_id_fkey"),
        error: || CatalogError::FileNotFound,
    }],
};

pub(crate) const VARIANT: ConstraintTable = ConstraintTable {
    model: "product_variant",
    rules: &[],
};

pub(crate) const OPTION: ConstraintTable = ConstraintTable {
    model: "product_option",
    rules: &[ConstraintRule {
        kind: ViolationKind::Unique,
        constraint: Some("duplicate_option_not_allowed"),
        error: || CatalogError::DuplicatedProductOption,
    }],
};

pub(crate) const OPTION_VALUE: ConstraintTable = ConstraintTable {
    model: "product_option_value",
    rules: &[
        ConstraintRule {
            kind: ViolationKind::ForeignKey,
            constraint: Some("product_option_value_option_id_fkey"),
            error: || CatalogError::ProductOptionNotFound,
        },
        ConstraintRule {
            kind: ViolationKind::Unique,
            constraint: Some("duplicate_option_value_not_allowed"),
            error: || CatalogError::DuplicatedVariantOptionValue,
        },
    ],
};

pub(crate) const PRICE: ConstraintTable = ConstraintTable {
    model: "money_amount",
    rules: &[],
};

pub(crate) const CATEGORY: ConstraintTable = ConstraintTable {
    model: "product_category",
    rules: &[
        ConstraintRule {
            kind: ViolationKind::ForeignKey,
            constraint: Some("product_category_parent_id_fkey"),
            error: || CatalogError::ParentProductCategoryNotFound,
        },
        ConstraintRule {
            kind: ViolationKind::InvalidTextRepresentation,
            constraint: None,
            error: || CatalogError::InvalidProductCategory,
        },
    ],
};

pub(crate) const CATEGORY_LINK: ConstraintTable = ConstraintTable {
    model: "product_category_product",
    rules: &[
        ConstraintRule {
            kind: ViolationKind::Unique,
            constraint: Some("product_category_product_pkey"),
            error: || CatalogError::DuplicatedProductCategoryForProduct,
        },
        ConstraintRule {
            kind: ViolationKind::ForeignKey,
            constraint: Some("product_category_product_category_id_fkey"),
            error: || CatalogError::ProductCategoryNotFound,
        },
        ConstraintRule {
            kind: ViolationKind::InvalidTextRepresentation,
            constraint: None,
            error: || CatalogError::InvalidProductCategory,
        },
    ],
};

pub(crate) const FILE: ConstraintTable = ConstraintTable {
    model: "file",
    rules: &[],
};

pub(crate) const FILE_LINK: ConstraintTable = ConstraintTable {
    model: "entity_file",
    rules: &[
        ConstraintRule {
            kind: ViolationKind::ForeignKey,
            constraint: Some("entity_file_file_id_fkey"),
            error: || CatalogError::FileNotFound,
        },
        ConstraintRule {
            kind: ViolationKind::Unique,
            constraint: Some("entity_file_pkey"),
            error: || CatalogError::DuplicatedProductImage,
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn violation(kind: ViolationKind, constraint: &str) -> ConstraintViolation {
        ConstraintViolation::new(kind, Some(constraint))
    }

    #[test]
    fn test_option_title_clash() {
        let err = OPTION.lookup(&violation(ViolationKind::Unique, "duplicate_option_not_allowed"));
        assert!(matches!(err, Some(CatalogError::DuplicatedProductOption)));
    }

    #[test]
    fn test_second_value_for_an_option_clashes() {
        let err = OPTION_VALUE.lookup(&violation(
            ViolationKind::Unique,
            "duplicate_option_value_not_allowed",
        ));
        assert!(matches!(err, Some(CatalogError::DuplicatedVariantOptionValue)));

        let missing = OPTION_VALUE.lookup(&violation(
            ViolationKind::ForeignKey,
            "product_option_value_option_id_fkey",
        ));
        assert!(matches!(missing, Some(CatalogError::ProductOptionNotFound)));
    }

    #[test]
    fn test_category_link_rules() {
        assert!(matches!(
            CATEGORY_LINK.lookup(&violation(
                ViolationKind::ForeignKey,
                "product_category_product_category_id_fkey"
            )),
            Some(CatalogError::ProductCategoryNotFound)
        ));
        assert!(matches!(
            CATEGORY_LINK.lookup(&violation(ViolationKind::Unique, "product_category_product_pkey")),
            Some(CatalogError::DuplicatedProductCategoryForProduct)
        ));
        assert!(matches!(
            CATEGORY_LINK.lookup(&ConstraintViolation::new(
                ViolationKind::InvalidTextRepresentation,
                None
            )),
            Some(CatalogError::InvalidProductCategory)
        ));
    }

    #[test]
    fn test_file_link_rules() {
        let missing = FILE_LINK.lookup(&violation(ViolationKind::ForeignKey, "entity_file_file_id_fkey"));
        assert_eq!(missing.map(|e| e.kind()), Some(ErrorKind::InvalidReference));

        let duplicate = FILE_LINK.lookup(&violation(ViolationKind::Unique, "entity_file_pkey"));
        assert_eq!(duplicate.map(|e| e.kind()), Some(ErrorKind::Conflict));
    }

    #[test]
    fn test_rules_are_scoped_to_their_model() {
        // The option table knows nothing about category links.
        assert!(
            OPTION
                .lookup(&violation(ViolationKind::Unique, "product_category_product_pkey"))
                .is_none()
        );
        // Same SQLSTATE, different constraint.
        assert!(
            CATEGORY_LINK
                .lookup(&violation(ViolationKind::ForeignKey, "product_category_product_product_id_fkey"))
                .is_none()
        );
        assert!(VARIANT.rules.is_empty());
    }

    #[test]
    fn test_untranslated_errors_keep_step_context() {
        let err = PRICE.translate("insert price", DbErr::Custom("disk full".to_string()));

        match err {
            CatalogError::Database { step, .. } => assert_eq!(step, "insert price"),
            other => panic!("expected database error, got {other:?}"),
        }
    }
}
