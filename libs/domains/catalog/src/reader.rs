//! Aggregation Reader.
//!
//! Both entry points reduce to [`load_aggregates`] over a set of products:
//! six fan-out queries scoped by `IN (...)`, whatever the set size.

use crate::aggregate::FanOut;
use crate::error::CatalogResult;
use crate::models::{AggregateProduct, Product};
use crate::pagination::{Page, PageRequest};
use crate::tables::{category_link, file_link, option, option_value, price, product, variant};
use sea_orm::ConnectionTrait;
use tracing::debug;
use uuid::Uuid;

pub(crate) async fn get_aggregate<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> CatalogResult<AggregateProduct> {
    let product: Product = product::find_live(conn, id).await?.into();
    let mut fan_out = load_fan_out(conn, &[product.id]).await?;
    Ok(fan_out.assemble(product))
}

/// Count, page query, then the shared fan-out for the page's products.
pub(crate) async fn list_aggregates<C: ConnectionTrait>(
    conn: &C,
    request: PageRequest,
) -> CatalogResult<Page<AggregateProduct>> {
    let total_count = product::count_live(conn).await?;
    let products = product::find_live_page(conn, request.offset(), request.limit()).await?;
    let items = load_aggregates(conn, products).await?;

    Ok(Page::new(items, total_count, request))
}

pub(crate) async fn load_aggregates<C: ConnectionTrait>(
    conn: &C,
    products: Vec<Product>,
) -> CatalogResult<Vec<AggregateProduct>> {
    if products.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = products.iter().map(|product| product.id).collect();
    let fan_out = load_fan_out(conn, &ids).await?;
    Ok(fan_out.assemble_all(products))
}

async fn load_fan_out<C: ConnectionTrait>(conn: &C, product_ids: &[Uuid]) -> CatalogResult<FanOut> {
    let fan_out = FanOut {
        variants: variant::find_for_products(conn, product_ids).await?,
        options: option::find_for_products(conn, product_ids).await?,
        categories: category_link::find_for_products(conn, product_ids).await?,
        images: file_link::find_for_entities(conn, product_ids).await?,
        prices: price::find_for_products(conn, product_ids).await?,
        option_values: option_value::find_for_products(conn, product_ids).await?,
    };

    debug!(
        products = product_ids.len(),
        variants = fan_out.variants.values().map(Vec::len).sum::<usize>(),
        "Loaded aggregate fan-out"
    );
    Ok(fan_out)
}
