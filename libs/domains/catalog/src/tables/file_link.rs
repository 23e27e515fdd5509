use crate::constraints::FILE_LINK;
use crate::entity::entity_file;
use crate::error::CatalogResult;
use crate::models::ProductImage;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;
use uuid::Uuid;

use super::now;

pub(crate) async fn link<C: ConnectionTrait>(
    conn: &C,
    entity_id: Uuid,
    file_id: Uuid,
) -> CatalogResult<()> {
    entity_file::ActiveModel {
        entity_id: Set(entity_id),
        file_id: Set(file_id),
        created_at: Set(now()),
    }
    .insert(conn)
    .await
    .map_err(|e| FILE_LINK.translate("link file", e))?;

    Ok(())
}

pub(crate) async fn unlink_entity<C: ConnectionTrait>(
    conn: &C,
    entity_id: Uuid,
) -> CatalogResult<u64> {
    let result = entity_file::Entity::delete_many()
        .filter(entity_file::Column::EntityId.eq(entity_id))
        .exec(conn)
        .await
        .map_err(|e| FILE_LINK.translate("unlink files", e))?;

    Ok(result.rows_affected)
}

/// Images attached to each entity in `entity_ids`.
pub(crate) async fn find_for_entities<C: ConnectionTrait>(
    conn: &C,
    entity_ids: &[Uuid],
) -> CatalogResult<HashMap<Uuid, Vec<ProductImage>>> {
    let models = entity_file::Entity::find()
        .filter(entity_file::Column::EntityId.is_in(entity_ids.iter().copied()))
        .order_by_asc(entity_file::Column::FileId)
        .all(conn)
        .await
        .map_err(|e| FILE_LINK.translate("load images", e))?;

    let mut by_entity: HashMap<Uuid, Vec<ProductImage>> = HashMap::new();
    for model in models {
        by_entity
            .entry(model.entity_id)
            .or_default()
            .push(ProductImage { id: model.file_id });
    }
    Ok(by_entity)
}
