//! Transactional Writer: multi-table create and update sequences.
//!
//! Every function expects to run on an open transaction and leaves commit or
//! rollback to the caller (see [`database::postgres::with_transaction`]). The
//! first failing step aborts the sequence with its translated error.

use crate::aggregate::FanOut;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    AggregateProduct, CategorySummary, CreateProduct, OptionValueInput, Product, ProductImage,
    ProductOption, UpdateProduct, UpdateVariant, Variant,
};
use crate::tables::{category, category_link, file_link, option, option_value, price, product, variant};
use sea_orm::ConnectionTrait;
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

/// Insert a product with its categories, options, variants and images.
///
/// The aggregate is assembled from the inserted rows without reading back.
pub(crate) async fn create_product<C: ConnectionTrait>(
    conn: &C,
    input: &CreateProduct,
) -> CatalogResult<AggregateProduct> {
    let product = product::insert(conn, input).await?;
    let mut fan_out = FanOut::default();

    let categories = link_categories(conn, product.id, &input.categories).await?;
    let options = option::insert_all(conn, product.id, &input.options).await?;

    let mut variants = Vec::with_capacity(input.variants.len());
    for (index, variant_input) in input.variants.iter().enumerate() {
        let created = variant::insert(conn, product.id, variant_input).await?;

        let option_ids = resolve_options(&options, index, &variant_input.options)?;
        let mut values = Vec::with_capacity(option_ids.len());
        for (option_id, value_input) in option_ids.into_iter().zip(&variant_input.options) {
            values.push(option_value::insert(conn, option_id, created.id, &value_input.value).await?);
        }

        let mut prices = Vec::with_capacity(variant_input.prices.len());
        for price_input in &variant_input.prices {
            prices.push(price::insert_for_variant(conn, created.id, price_input).await?);
        }

        fan_out.option_values.insert(created.id, values);
        fan_out.prices.insert(created.id, prices);
        variants.push(created);
    }

    let images = link_images(conn, product.id, &input.images).await?;

    debug!(
        product_id = %product.id,
        variants = variants.len(),
        options = options.len(),
        categories = categories.len(),
        images = images.len(),
        "Inserted product graph"
    );

    fan_out.variants.insert(product.id, variants);
    fan_out.options.insert(product.id, options);
    fan_out.categories.insert(product.id, categories);
    fan_out.images.insert(product.id, images);

    Ok(fan_out.assemble(product))
}

/// Apply present scalars, then replace each present collection wholesale.
pub(crate) async fn update_product<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    input: &UpdateProduct,
) -> CatalogResult<Product> {
    let existing = product::find_live(conn, id).await?;

    let touches_collections =
        input.categories.is_some() || input.options.is_some() || input.images.is_some();
    let updated = if input.has_scalar_changes() || touches_collections {
        product::update(conn, existing, input).await?
    } else {
        existing.into()
    };

    if let Some(categories) = &input.categories {
        category_link::unlink_product(conn, id).await?;
        link_categories(conn, id, categories).await?;
    }

    if let Some(titles) = &input.options {
        option::delete_for_product(conn, id).await?;
        option::insert_all(conn, id, titles).await?;
    }

    if let Some(images) = &input.images {
        file_link::unlink_entity(conn, id).await?;
        link_images(conn, id, images).await?;
    }

    Ok(updated)
}

/// Variant counterpart of [`update_product`].
///
/// Variants of a soft-deleted product are not found, like the product itself.
/// Replaced prices are only unlinked; their money amount rows are left behind.
pub(crate) async fn update_variant<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    input: &UpdateVariant,
) -> CatalogResult<Variant> {
    let existing = variant::find_by_id(conn, id).await?;
    let product_id = existing.product_id;
    product::find_live(conn, product_id).await?;
    let updated = variant::update(conn, existing, input).await?;

    if let Some(values) = &input.options {
        let owned: HashSet<Uuid> = option::find_for_products(conn, &[product_id])
            .await?
            .remove(&product_id)
            .unwrap_or_default()
            .into_iter()
            .map(|option| option.id)
            .collect();

        if values.iter().any(|value| !owned.contains(&value.option_id)) {
            return Err(CatalogError::ProductOptionNotFound);
        }

        option_value::delete_for_variant(conn, id).await?;
        for value in values {
            option_value::insert(conn, value.option_id, id, &value.value).await?;
        }
    }

    if let Some(prices) = &input.prices {
        price::unlink_variant(conn, id).await?;
        for price_input in prices {
            price::insert_for_variant(conn, id, price_input).await?;
        }
    }

    Ok(updated)
}

/// Link live categories to a product, sorted by id like the reader returns them.
async fn link_categories<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
    category_ids: &[Uuid],
) -> CatalogResult<Vec<CategorySummary>> {
    let mut linked = Vec::with_capacity(category_ids.len());

    for &category_id in category_ids {
        let found = category::find_live(conn, category_id)
            .await
            .map_err(|err| match err {
                CatalogError::RecordNotFound => CatalogError::ProductCategoryNotFound,
                other => other,
            })?;
        category_link::link(conn, product_id, category_id).await?;
        linked.push(CategorySummary::from(&found));
    }

    linked.sort_by_key(|category| category.id);
    Ok(linked)
}

async fn link_images<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
    file_ids: &[Uuid],
) -> CatalogResult<Vec<ProductImage>> {
    for &file_id in file_ids {
        file_link::link(conn, product_id, file_id).await?;
    }

    let mut images: Vec<ProductImage> = file_ids.iter().map(|&id| ProductImage { id }).collect();
    images.sort_by_key(|image| image.id);
    Ok(images)
}

/// Option ids for the values of the `variant`-th variant, in input order.
///
/// An explicit option title wins; otherwise a value pairs with the option at
/// the same position. Each option takes at most one value per variant, so a
/// second value landing on an already claimed option is unresolved.
fn resolve_options(
    options: &[ProductOption],
    variant: usize,
    values: &[OptionValueInput],
) -> CatalogResult<Vec<Uuid>> {
    let mut claimed = HashSet::with_capacity(values.len());

    values
        .iter()
        .enumerate()
        .map(|(position, input)| {
            let found = match &input.option {
                Some(title) => options.iter().find(|option| &option.title == title),
                None => options.get(position),
            };

            match found {
                Some(option) if claimed.insert(option.id) => Ok(option.id),
                _ => Err(CatalogError::UnresolvedVariantOption { variant, position }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{product as product_entity, product_category, product_variant};
    use crate::models::{CreateVariant, PriceInput, ProductStatus};
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn options() -> Vec<ProductOption> {
        ["Size", "Color"]
            .into_iter()
            .map(|title| ProductOption {
                id: Uuid::now_v7(),
                title: title.to_string(),
            })
            .collect()
    }

    fn value(option: Option<&str>, value: &str) -> OptionValueInput {
        OptionValueInput {
            option: option.map(str::to_string),
            value: value.to_string(),
        }
    }

    fn product_model(id: Uuid) -> product_entity::Model {
        let now = Utc::now().into();
        product_entity::Model {
            id,
            title: "Runner".to_string(),
            subtitle: None,
            description: "Trail shoe".to_string(),
            thumbnail_id: None,
            status: ProductStatus::Draft,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn variant_model(id: Uuid, product_id: Uuid) -> product_variant::Model {
        let now = Utc::now().into();
        product_variant::Model {
            id,
            product_id,
            title: "Runner 42".to_string(),
            sku: None,
            barcode: None,
            inventory_quantity: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_resolve_by_position() {
        let options = options();
        let ids = resolve_options(&options, 0, &[value(None, "M"), value(None, "Red")]).unwrap();
        assert_eq!(ids, vec![options[0].id, options[1].id]);
    }

    #[test]
    fn test_resolve_by_title_ignores_position() {
        let options = options();
        let ids = resolve_options(&options, 0, &[value(Some("Color"), "Red")]).unwrap();
        assert_eq!(ids, vec![options[1].id]);
    }

    #[test]
    fn test_resolve_mixed_titles_and_positions() {
        let options = options();
        let ids =
            resolve_options(&options, 0, &[value(None, "M"), value(Some("Color"), "Red")]).unwrap();
        assert_eq!(ids, vec![options[0].id, options[1].id]);
    }

    #[test]
    fn test_unresolvable_values() {
        let options = options();

        let out_of_range = resolve_options(&options, 2, &[value(None, "M"), value(None, "Red"), value(None, "XL")]);
        assert!(matches!(
            out_of_range,
            Err(CatalogError::UnresolvedVariantOption { variant: 2, position: 2 })
        ));

        let unknown_title = resolve_options(&options, 0, &[value(Some("Material"), "Wool")]);
        assert!(matches!(
            unknown_title,
            Err(CatalogError::UnresolvedVariantOption { variant: 0, position: 0 })
        ));
    }

    #[test]
    fn test_titled_value_cannot_share_an_option_with_a_positional_one() {
        let options = options();

        // "Color" claims option #1, then the positional value at #1 lands on it again.
        let result = resolve_options(&options, 0, &[value(Some("Color"), "Red"), value(None, "M")]);

        assert!(matches!(
            result,
            Err(CatalogError::UnresolvedVariantOption { variant: 0, position: 1 })
        ));
    }

    #[test]
    fn test_repeated_title_is_unresolved() {
        let options = options();

        let result = resolve_options(&options, 3, &[value(Some("Size"), "M"), value(Some("Size"), "L")]);

        assert!(matches!(
            result,
            Err(CatalogError::UnresolvedVariantOption { variant: 3, position: 1 })
        ));
    }

    #[tokio::test]
    async fn test_create_stops_at_missing_category() {
        let product_id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![product_model(product_id)]])
            .append_query_results([Vec::<product_category::Model>::new()])
            .into_connection();

        let input = CreateProduct {
            title: "Runner".to_string(),
            subtitle: None,
            description: "Trail shoe".to_string(),
            status: ProductStatus::Draft,
            thumbnail_id: None,
            categories: vec![Uuid::now_v7()],
            options: vec![],
            variants: vec![CreateVariant {
                title: "Runner 42".to_string(),
                sku: None,
                barcode: None,
                inventory_quantity: 0,
                options: vec![],
                prices: vec![PriceInput {
                    currency_code: "USD".to_string(),
                    amount: dec!(10),
                }],
            }],
            images: vec![],
        };

        let result = create_product(&db, &input).await;

        assert!(matches!(result, Err(CatalogError::ProductCategoryNotFound)));
        // Product insert and the category lookup; nothing after the miss.
        assert_eq!(db.into_transaction_log().len(), 2);
    }

    #[tokio::test]
    async fn test_update_variant_rejects_foreign_option() {
        let product_id = Uuid::now_v7();
        let variant_id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![variant_model(variant_id, product_id)]])
            .append_query_results([vec![product_model(product_id)]])
            .append_query_results([vec![variant_model(variant_id, product_id)]])
            .append_query_results([Vec::<crate::entity::product_option::Model>::new()])
            .into_connection();

        let input = UpdateVariant {
            options: Some(vec![crate::models::VariantOptionInput {
                option_id: Uuid::now_v7(),
                value: "XL".to_string(),
            }]),
            ..Default::default()
        };

        let result = update_variant(&db, variant_id, &input).await;

        assert!(matches!(result, Err(CatalogError::ProductOptionNotFound)));
    }

    #[tokio::test]
    async fn test_update_variant_of_deleted_product() {
        let product_id = Uuid::now_v7();
        let variant_id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![variant_model(variant_id, product_id)]])
            .append_query_results([Vec::<product_entity::Model>::new()])
            .into_connection();

        let input = UpdateVariant {
            inventory_quantity: Some(7),
            ..Default::default()
        };

        let result = update_variant(&db, variant_id, &input).await;

        assert!(matches!(result, Err(CatalogError::RecordNotFound)));
        // Variant and product lookups only; the variant row is never written.
        assert_eq!(db.into_transaction_log().len(), 2);
    }

    #[tokio::test]
    async fn test_update_product_missing_is_record_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<product_entity::Model>::new()])
            .into_connection();

        let result = update_product(&db, Uuid::now_v7(), &UpdateProduct::default()).await;

        assert!(matches!(result, Err(CatalogError::RecordNotFound)));
    }
}
