use crate::constraints::CATEGORY_LINK;
use crate::entity::{product_category, product_category_product};
use crate::error::CatalogResult;
use crate::models::CategorySummary;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, FromQueryResult)]
struct LinkedCategoryRow {
    product_id: Uuid,
    id: Uuid,
    name: String,
}

pub(crate) async fn link<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
    category_id: Uuid,
) -> CatalogResult<()> {
    product_category_product::ActiveModel {
        product_category_id: Set(category_id),
        product_id: Set(product_id),
    }
    .insert(conn)
    .await
    .map_err(|e| CATEGORY_LINK.translate("link category", e))?;

    Ok(())
}

pub(crate) async fn unlink_product<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
) -> CatalogResult<u64> {
    let result = product_category_product::Entity::delete_many()
        .filter(product_category_product::Column::ProductId.eq(product_id))
        .exec(conn)
        .await
        .map_err(|e| CATEGORY_LINK.translate("unlink categories", e))?;

    Ok(result.rows_affected)
}

/// Live categories linked to each product in `product_ids`.
pub(crate) async fn find_for_products<C: ConnectionTrait>(
    conn: &C,
    product_ids: &[Uuid],
) -> CatalogResult<HashMap<Uuid, Vec<CategorySummary>>> {
    let rows = product_category_product::Entity::find()
        .select_only()
        .column(product_category_product::Column::ProductId)
        .column(product_category::Column::Id)
        .column(product_category::Column::Name)
        .inner_join(product_category::Entity)
        .filter(product_category_product::Column::ProductId.is_in(product_ids.iter().copied()))
        .filter(product_category::Column::DeletedAt.is_null())
        .order_by_asc(product_category::Column::Id)
        .into_model::<LinkedCategoryRow>()
        .all(conn)
        .await
        .map_err(|e| CATEGORY_LINK.translate("load product categories", e))?;

    let mut by_product: HashMap<Uuid, Vec<CategorySummary>> = HashMap::new();
    for row in rows {
        by_product
            .entry(row.product_id)
            .or_default()
            .push(CategorySummary {
                id: row.id,
                name: row.name,
            });
    }
    Ok(by_product)
}
