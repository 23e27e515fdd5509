use crate::constraints::PRODUCT;
use crate::entity::product;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::now;

pub(crate) async fn insert<C: ConnectionTrait>(
    conn: &C,
    input: &CreateProduct,
) -> CatalogResult<Product> {
    let timestamp = now();
    let model = product::ActiveModel {
        id: Set(Uuid::now_v7()),
        title: Set(input.title.clone()),
        subtitle: Set(input.subtitle.clone()),
        description: Set(input.description.clone()),
        thumbnail_id: Set(input.thumbnail_id),
        status: Set(input.status),
        created_at: Set(timestamp),
        updated_at: Set(timestamp),
        deleted_at: Set(None),
    }
    .insert(conn)
    .await
    .map_err(|e| PRODUCT.translate("insert product", e))?;

    Ok(model.into())
}

/// Product that has not been soft-deleted.
pub(crate) async fn find_live<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> CatalogResult<product::Model> {
    product::Entity::find_by_id(id)
        .filter(product::Column::DeletedAt.is_null())
        .one(conn)
        .await
        .map_err(|e| PRODUCT.translate("load product", e))?
        .ok_or(CatalogError::RecordNotFound)
}

pub(crate) async fn update<C: ConnectionTrait>(
    conn: &C,
    existing: product::Model,
    input: &UpdateProduct,
) -> CatalogResult<Product> {
    let mut active = existing.into_active_model();

    if let Some(title) = &input.title {
        active.title = Set(title.clone());
    }
    if let Some(subtitle) = &input.subtitle {
        active.subtitle = Set(subtitle.clone());
    }
    if let Some(description) = &input.description {
        active.description = Set(description.clone());
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    if let Some(thumbnail_id) = input.thumbnail_id {
        active.thumbnail_id = Set(thumbnail_id);
    }
    active.updated_at = Set(now());

    let model = active
        .update(conn)
        .await
        .map_err(|e| PRODUCT.translate("update product", e))?;

    Ok(model.into())
}

/// Soft delete. Zero affected rows (missing or already deleted) is
/// [`CatalogError::RecordNotFound`].
pub(crate) async fn mark_deleted<C: ConnectionTrait>(conn: &C, id: Uuid) -> CatalogResult<()> {
    let result = product::Entity::update_many()
        .col_expr(product::Column::DeletedAt, Expr::value(now()))
        .filter(product::Column::Id.eq(id))
        .filter(product::Column::DeletedAt.is_null())
        .exec(conn)
        .await
        .map_err(|e| PRODUCT.translate("mark product as deleted", e))?;

    if result.rows_affected == 0 {
        return Err(CatalogError::RecordNotFound);
    }
    Ok(())
}

pub(crate) async fn count_live<C: ConnectionTrait>(conn: &C) -> CatalogResult<u64> {
    product::Entity::find()
        .filter(product::Column::DeletedAt.is_null())
        .count(conn)
        .await
        .map_err(|e| PRODUCT.translate("count products", e))
}

/// One page of live products, newest first.
pub(crate) async fn find_live_page<C: ConnectionTrait>(
    conn: &C,
    offset: u64,
    limit: u64,
) -> CatalogResult<Vec<Product>> {
    let models = product::Entity::find()
        .filter(product::Column::DeletedAt.is_null())
        .order_by_desc(product::Column::CreatedAt)
        .order_by_desc(product::Column::Id)
        .offset(offset)
        .limit(limit)
        .all(conn)
        .await
        .map_err(|e| PRODUCT.translate("load product page", e))?;

    Ok(models.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_find_live_missing_is_record_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<product::Model>::new()])
            .into_connection();

        let result = find_live(&db, Uuid::now_v7()).await;

        assert!(matches!(result, Err(CatalogError::RecordNotFound)));
    }

    #[tokio::test]
    async fn test_mark_deleted_twice() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let id = Uuid::now_v7();

        assert!(mark_deleted(&db, id).await.is_ok());
        assert!(matches!(
            mark_deleted(&db, id).await,
            Err(CatalogError::RecordNotFound)
        ));
    }
}
