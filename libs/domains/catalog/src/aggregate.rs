//! Aggregate Builder: stitches flat fan-out rows into nested products.
//!
//! Pure and synchronous. The reader fills a [`FanOut`] from its batched
//! queries, the writer fills one from the rows it just inserted; both hand
//! products to [`FanOut::assemble`].

use crate::models::{
    AggregateProduct, AggregateVariant, CategorySummary, Price, Product, ProductImage,
    ProductOption, Variant, VariantOptionValue,
};
use std::collections::HashMap;
use uuid::Uuid;

/// Child rows for a set of products.
///
/// Product-scoped maps are keyed by product id, variant-scoped maps by variant id.
#[derive(Debug, Default)]
pub(crate) struct FanOut {
    pub variants: HashMap<Uuid, Vec<Variant>>,
    pub options: HashMap<Uuid, Vec<ProductOption>>,
    pub categories: HashMap<Uuid, Vec<CategorySummary>>,
    pub images: HashMap<Uuid, Vec<ProductImage>>,
    pub prices: HashMap<Uuid, Vec<Price>>,
    pub option_values: HashMap<Uuid, Vec<VariantOptionValue>>,
}

impl FanOut {
    /// Build the aggregate for `product`, moving its rows out of the maps.
    ///
    /// A product or variant without rows in a map gets an empty collection.
    pub fn assemble(&mut self, product: Product) -> AggregateProduct {
        let variants = self
            .variants
            .remove(&product.id)
            .unwrap_or_default()
            .into_iter()
            .map(|variant| self.assemble_variant(variant))
            .collect();

        AggregateProduct {
            id: product.id,
            title: product.title,
            subtitle: product.subtitle,
            description: product.description,
            status: product.status,
            thumbnail: product.thumbnail_id.map(|id| ProductImage { id }),
            created_at: product.created_at,
            updated_at: product.updated_at,
            variants,
            categories: self.categories.remove(&product.id).unwrap_or_default(),
            options: self.options.remove(&product.id).unwrap_or_default(),
            images: self.images.remove(&product.id).unwrap_or_default(),
        }
    }

    fn assemble_variant(&mut self, variant: Variant) -> AggregateVariant {
        AggregateVariant {
            id: variant.id,
            product_id: variant.product_id,
            title: variant.title,
            sku: variant.sku,
            barcode: variant.barcode,
            inventory_quantity: variant.inventory_quantity,
            created_at: variant.created_at,
            updated_at: variant.updated_at,
            prices: self.prices.remove(&variant.id).unwrap_or_default(),
            options: self.option_values.remove(&variant.id).unwrap_or_default(),
        }
    }

    /// Assemble every product, keeping the input order.
    pub fn assemble_all(mut self, products: Vec<Product>) -> Vec<AggregateProduct> {
        products
            .into_iter()
            .map(|product| self.assemble(product))
            .collect()
    }
}
