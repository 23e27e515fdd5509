use crate::constraints::OPTION;
use crate::entity::product_option;
use crate::error::CatalogResult;
use crate::models::ProductOption;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::collections::HashMap;
use uuid::Uuid;

use super::now;

/// Insert one option per title, returning them in input order.
pub(crate) async fn insert_all<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
    titles: &[String],
) -> CatalogResult<Vec<ProductOption>> {
    let mut options = Vec::with_capacity(titles.len());

    for title in titles {
        let timestamp = now();
        let model = product_option::ActiveModel {
            id: Set(Uuid::now_v7()),
            product_id: Set(product_id),
            title: Set(title.clone()),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(conn)
        .await
        .map_err(|e| OPTION.translate("insert product option", e))?;

        options.push(model.into());
    }

    Ok(options)
}

/// Removes the options and, through the cascade, every variant value that used them.
pub(crate) async fn delete_for_product<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
) -> CatalogResult<u64> {
    let result = product_option::Entity::delete_many()
        .filter(product_option::Column::ProductId.eq(product_id))
        .exec(conn)
        .await
        .map_err(|e| OPTION.translate("delete product options", e))?;

    Ok(result.rows_affected)
}

pub(crate) async fn find_for_products<C: ConnectionTrait>(
    conn: &C,
    product_ids: &[Uuid],
) -> CatalogResult<HashMap<Uuid, Vec<ProductOption>>> {
    let models = product_option::Entity::find()
        .filter(product_option::Column::ProductId.is_in(product_ids.iter().copied()))
        .order_by_asc(product_option::Column::Id)
        .all(conn)
        .await
        .map_err(|e| OPTION.translate("load product options", e))?;

    let mut by_product: HashMap<Uuid, Vec<ProductOption>> = HashMap::new();
    for model in models {
        by_product
            .entry(model.product_id)
            .or_default()
            .push(model.into());
    }
    Ok(by_product)
}
