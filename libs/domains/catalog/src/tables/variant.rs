use crate::constraints::VARIANT;
use crate::entity::product_variant;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateVariant, UpdateVariant, Variant};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;
use uuid::Uuid;

use super::now;

pub(crate) async fn insert<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
    input: &CreateVariant,
) -> CatalogResult<Variant> {
    let timestamp = now();
    let model = product_variant::ActiveModel {
        id: Set(Uuid::now_v7()),
        product_id: Set(product_id),
        title: Set(input.title.clone()),
        sku: Set(input.sku.clone()),
        barcode: Set(input.barcode.clone()),
        inventory_quantity: Set(input.inventory_quantity),
        created_at: Set(timestamp),
        updated_at: Set(timestamp),
    }
    .insert(conn)
    .await
    .map_err(|e| VARIANT.translate("insert variant", e))?;

    Ok(model.into())
}

pub(crate) async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> CatalogResult<product_variant::Model> {
    product_variant::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| VARIANT.translate("load variant", e))?
        .ok_or(CatalogError::RecordNotFound)
}

pub(crate) async fn update<C: ConnectionTrait>(
    conn: &C,
    existing: product_variant::Model,
    input: &UpdateVariant,
) -> CatalogResult<Variant> {
    let mut active = existing.into_active_model();

    if let Some(title) = &input.title {
        active.title = Set(title.clone());
    }
    if let Some(sku) = &input.sku {
        active.sku = Set(sku.clone());
    }
    if let Some(barcode) = &input.barcode {
        active.barcode = Set(barcode.clone());
    }
    if let Some(quantity) = input.inventory_quantity {
        active.inventory_quantity = Set(quantity);
    }
    active.updated_at = Set(now());

    let model = active
        .update(conn)
        .await
        .map_err(|e| VARIANT.translate("update variant", e))?;

    Ok(model.into())
}

/// Variants of every product in `product_ids`, keyed by product id.
pub(crate) async fn find_for_products<C: ConnectionTrait>(
    conn: &C,
    product_ids: &[Uuid],
) -> CatalogResult<HashMap<Uuid, Vec<Variant>>> {
    let models = product_variant::Entity::find()
        .filter(product_variant::Column::ProductId.is_in(product_ids.iter().copied()))
        .order_by_asc(product_variant::Column::Id)
        .all(conn)
        .await
        .map_err(|e| VARIANT.translate("load variants", e))?;

    let mut by_product: HashMap<Uuid, Vec<Variant>> = HashMap::new();
    for model in models {
        by_product
            .entry(model.product_id)
            .or_default()
            .push(model.into());
    }
    Ok(by_product)
}
