use crate::constraints::PRICE;
use crate::entity::{money_amount, product_variant, product_variant_money_amount as variant_price};
use crate::error::CatalogResult;
use crate::models::{Price, PriceInput};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    prelude::{DateTimeWithTimeZone, Decimal},
};
use std::collections::HashMap;
use uuid::Uuid;

use super::now;

#[derive(Debug, FromQueryResult)]
struct VariantPriceRow {
    variant_id: Uuid,
    id: Uuid,
    currency_code: String,
    amount: Decimal,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
}

impl From<VariantPriceRow> for Price {
    fn from(row: VariantPriceRow) -> Self {
        Self {
            id: row.id,
            currency_code: row.currency_code,
            amount: row.amount,
            created_at: row.created_at.into(),
            updated_at: row.updated_at.into(),
        }
    }
}

/// Insert a money amount and link it to the variant.
pub(crate) async fn insert_for_variant<C: ConnectionTrait>(
    conn: &C,
    variant_id: Uuid,
    input: &PriceInput,
) -> CatalogResult<Price> {
    let timestamp = now();
    let amount = money_amount::ActiveModel {
        id: Set(Uuid::now_v7()),
        currency_code: Set(input.currency_code.clone()),
        amount: Set(input.amount),
        created_at: Set(timestamp),
        updated_at: Set(timestamp),
    }
    .insert(conn)
    .await
    .map_err(|e| PRICE.translate("insert price", e))?;

    variant_price::ActiveModel {
        variant_id: Set(variant_id),
        money_amount_id: Set(amount.id),
        created_at: Set(timestamp),
    }
    .insert(conn)
    .await
    .map_err(|e| PRICE.translate("link price to variant", e))?;

    Ok(amount.into())
}

/// Drops the variant's price links. The money amount rows stay behind.
pub(crate) async fn unlink_variant<C: ConnectionTrait>(
    conn: &C,
    variant_id: Uuid,
) -> CatalogResult<u64> {
    let result = variant_price::Entity::delete_many()
        .filter(variant_price::Column::VariantId.eq(variant_id))
        .exec(conn)
        .await
        .map_err(|e| PRICE.translate("unlink variant prices", e))?;

    Ok(result.rows_affected)
}

/// Prices of every variant under `product_ids`, keyed by variant id.
///
/// One query: money_amount ⋈ product_variant_money_amount ⋈ product_variant.
pub(crate) async fn find_for_products<C: ConnectionTrait>(
    conn: &C,
    product_ids: &[Uuid],
) -> CatalogResult<HashMap<Uuid, Vec<Price>>> {
    let rows = money_amount::Entity::find()
        .select_only()
        .column_as(variant_price::Column::VariantId, "variant_id")
        .columns([
            money_amount::Column::Id,
            money_amount::Column::CurrencyCode,
            money_amount::Column::Amount,
            money_amount::Column::CreatedAt,
            money_amount::Column::UpdatedAt,
        ])
        .join(
            JoinType::InnerJoin,
            variant_price::Relation::MoneyAmount.def().rev(),
        )
        .join(JoinType::InnerJoin, variant_price::Relation::Variant.def())
        .filter(product_variant::Column::ProductId.is_in(product_ids.iter().copied()))
        .order_by_asc(money_amount::Column::Id)
        .into_model::<VariantPriceRow>()
        .all(conn)
        .await
        .map_err(|e| PRICE.translate("load prices", e))?;

    let mut by_variant: HashMap<Uuid, Vec<Price>> = HashMap::new();
    for row in rows {
        by_variant.entry(row.variant_id).or_default().push(row.into());
    }
    Ok(by_variant)
}
