use crate::constraints::OPTION_VALUE;
use crate::entity::{product_option_value, product_variant};
use crate::error::CatalogResult;
use crate::models::VariantOptionValue;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::collections::HashMap;
use uuid::Uuid;

use super::now;

pub(crate) async fn insert<C: ConnectionTrait>(
    conn: &C,
    option_id: Uuid,
    variant_id: Uuid,
    value: &str,
) -> CatalogResult<VariantOptionValue> {
    let timestamp = now();
    let model = product_option_value::ActiveModel {
        id: Set(Uuid::now_v7()),
        option_id: Set(option_id),
        variant_id: Set(variant_id),
        title: Set(value.to_string()),
        created_at: Set(timestamp),
        updated_at: Set(timestamp),
    }
    .insert(conn)
    .await
    .map_err(|e| OPTION_VALUE.translate("insert option value", e))?;

    Ok(model.into())
}

pub(crate) async fn delete_for_variant<C: ConnectionTrait>(
    conn: &C,
    variant_id: Uuid,
) -> CatalogResult<u64> {
    let result = product_option_value::Entity::delete_many()
        .filter(product_option_value::Column::VariantId.eq(variant_id))
        .exec(conn)
        .await
        .map_err(|e| OPTION_VALUE.translate("delete option values", e))?;

    Ok(result.rows_affected)
}

/// Option values of every variant under `product_ids`, keyed by variant id.
pub(crate) async fn find_for_products<C: ConnectionTrait>(
    conn: &C,
    product_ids: &[Uuid],
) -> CatalogResult<HashMap<Uuid, Vec<VariantOptionValue>>> {
    let models = product_option_value::Entity::find()
        .inner_join(product_variant::Entity)
        .filter(product_variant::Column::ProductId.is_in(product_ids.iter().copied()))
        .order_by_asc(product_option_value::Column::Id)
        .all(conn)
        .await
        .map_err(|e| OPTION_VALUE.translate("load option values", e))?;

    let mut by_variant: HashMap<Uuid, Vec<VariantOptionValue>> = HashMap::new();
    for model in models {
        by_variant
            .entry(model.variant_id)
            .or_default()
            .push(model.into());
    }
    Ok(by_variant)
}
