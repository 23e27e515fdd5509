use crate::constraints::CATEGORY;
use crate::entity::product_category;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, CreateCategory, UpdateCategory};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::now;

pub(crate) async fn insert<C: ConnectionTrait>(
    conn: &C,
    input: &CreateCategory,
) -> CatalogResult<Category> {
    let timestamp = now();
    let model = product_category::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set(input.name.clone()),
        parent_id: Set(input.parent_id),
        created_at: Set(timestamp),
        updated_at: Set(timestamp),
        deleted_at: Set(None),
    }
    .insert(conn)
    .await
    .map_err(|e| CATEGORY.translate("insert category", e))?;

    Ok(model.into())
}

pub(crate) async fn find_live<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> CatalogResult<product_category::Model> {
    product_category::Entity::find_by_id(id)
        .filter(product_category::Column::DeletedAt.is_null())
        .one(conn)
        .await
        .map_err(|e| CATEGORY.translate("load category", e))?
        .ok_or(CatalogError::RecordNotFound)
}

pub(crate) async fn find_all_live<C: ConnectionTrait>(conn: &C) -> CatalogResult<Vec<Category>> {
    let models = product_category::Entity::find()
        .filter(product_category::Column::DeletedAt.is_null())
        .order_by_asc(product_category::Column::Id)
        .all(conn)
        .await
        .map_err(|e| CATEGORY.translate("load categories", e))?;

    Ok(models.into_iter().map(Into::into).collect())
}

pub(crate) async fn update<C: ConnectionTrait>(
    conn: &C,
    existing: product_category::Model,
    input: &UpdateCategory,
) -> CatalogResult<Category> {
    let mut active = existing.into_active_model();

    if let Some(name) = &input.name {
        active.name = Set(name.clone());
    }
    if let Some(parent_id) = input.parent_id {
        active.parent_id = Set(parent_id);
    }
    active.updated_at = Set(now());

    let model = active
        .update(conn)
        .await
        .map_err(|e| CATEGORY.translate("update category", e))?;

    Ok(model.into())
}

pub(crate) async fn mark_deleted<C: ConnectionTrait>(conn: &C, id: Uuid) -> CatalogResult<()> {
    let result = product_category::Entity::update_many()
        .col_expr(product_category::Column::DeletedAt, Expr::value(now()))
        .filter(product_category::Column::Id.eq(id))
        .filter(product_category::Column::DeletedAt.is_null())
        .exec(conn)
        .await
        .map_err(|e| CATEGORY.translate("mark category as deleted", e))?;

    if result.rows_affected == 0 {
        return Err(CatalogError::RecordNotFound);
    }
    Ok(())
}
