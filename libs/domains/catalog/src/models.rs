use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// ISO 4217 style code: three ASCII uppercase letters.
fn validate_currency_code(code: &str) -> Result<(), ValidationError> {
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_currency_code"))
    }
}

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() {
        return Err(ValidationError::new("negative_amount"));
    }
    Ok(())
}

/// Distinguishes "absent" from an explicit `null` for nullable update fields.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Publication status of a product
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "product_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
}

// ============================================================================
// Records
// ============================================================================

/// Scalar product row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub thumbnail_id: Option<Uuid>,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Scalar variant row, a purchasable SKU
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: Uuid,
    pub product_id: Uuid,
    pub title: String,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub inventory_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    pub id: Uuid,
    pub title: String,
}

/// One variant's value for one product option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOptionValue {
    pub id: Uuid,
    pub option_id: Uuid,
    pub value: String,
}

/// A money amount attached to a variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub id: Uuid,
    pub currency_code: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: Uuid,
}

/// Live product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category with its live descendants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTree {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub children: Vec<CategoryTree>,
}

/// Stored file metadata; the bytes live elsewhere
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: Uuid,
    pub original_name: String,
    pub mime_type: String,
    pub extension: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Aggregate views
// ============================================================================

/// A product with every child collection stitched in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateProduct {
    pub id: Uuid,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    pub status: ProductStatus,
    pub thumbnail: Option<ProductImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub variants: Vec<AggregateVariant>,
    pub categories: Vec<CategorySummary>,
    pub options: Vec<ProductOption>,
    pub images: Vec<ProductImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateVariant {
    pub id: Uuid,
    pub product_id: Uuid,
    pub title: String,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub inventory_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub prices: Vec<Price>,
    pub options: Vec<VariantOptionValue>,
}

// ============================================================================
// Inputs
// ============================================================================
//
// The `Validate` derives describe the shape callers must check before
// handing input to the catalog; the catalog itself does not re-validate.

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 255))]
    pub subtitle: Option<String>,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub status: ProductStatus,
    pub thumbnail_id: Option<Uuid>,
    #[serde(default)]
    pub categories: Vec<Uuid>,
    /// Option titles, e.g. `["Size", "Color"]`
    #[serde(default)]
    pub options: Vec<String>,
    #[validate(length(min = 1), nested)]
    pub variants: Vec<CreateVariant>,
    #[serde(default)]
    pub images: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVariant {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub inventory_quantity: i32,
    #[serde(default)]
    #[validate(nested)]
    pub options: Vec<OptionValueInput>,
    #[validate(length(min = 1), nested)]
    pub prices: Vec<PriceInput>,
}

/// A variant's value for a product option named in the same create call.
///
/// `option` names the option by title. When it is omitted the value belongs
/// to the option at the same position in [`CreateProduct::options`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OptionValueInput {
    pub option: Option<String>,
    #[validate(length(min = 1))]
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PriceInput {
    #[validate(custom(function = "validate_currency_code"))]
    pub currency_code: String,
    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,
}

/// Partial product update.
///
/// Scalars are written when present; nullable ones take `null` to clear. A
/// present collection replaces the stored one wholesale (an empty list clears
/// it); an absent one is untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 255))]
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub subtitle: Option<Option<String>>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub status: Option<ProductStatus>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbnail_id: Option<Option<Uuid>>,
    pub categories: Option<Vec<Uuid>>,
    pub options: Option<Vec<String>>,
    pub images: Option<Vec<Uuid>>,
}

impl UpdateProduct {
    pub fn has_scalar_changes(&self) -> bool {
        self.title.is_some()
            || self.subtitle.is_some()
            || self.description.is_some()
            || self.status.is_some()
            || self.thumbnail_id.is_some()
    }
}

/// Partial variant update with the same replace semantics as [`UpdateProduct`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateVariant {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub sku: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub barcode: Option<Option<String>>,
    #[validate(range(min = 0))]
    pub inventory_quantity: Option<i32>,
    #[validate(nested)]
    pub options: Option<Vec<VariantOptionInput>>,
    #[validate(nested)]
    pub prices: Option<Vec<PriceInput>>,
}

/// Option value keyed by an existing option id
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VariantOptionInput {
    pub option_id: Uuid,
    #[validate(length(min = 1))]
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    /// Absent leaves the parent alone, `null` detaches, a value re-parents.
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_id: Option<Option<Uuid>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterFile {
    #[validate(length(min = 1, max = 255))]
    pub original_name: String,
    #[validate(length(min = 1))]
    pub mime_type: String,
    pub extension: String,
    #[validate(range(min = 0))]
    pub size: i64,
}
