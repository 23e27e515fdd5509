use crate::constraints::FILE;
use crate::entity::file;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{FileRecord, RegisterFile};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};
use uuid::Uuid;

use super::now;

pub(crate) async fn insert<C: ConnectionTrait>(
    conn: &C,
    input: &RegisterFile,
) -> CatalogResult<FileRecord> {
    let timestamp = now();
    let model = file::ActiveModel {
        id: Set(Uuid::now_v7()),
        original_name: Set(input.original_name.clone()),
        mime_type: Set(input.mime_type.clone()),
        extension: Set(input.extension.clone()),
        size: Set(input.size),
        created_at: Set(timestamp),
        updated_at: Set(timestamp),
    }
    .insert(conn)
    .await
    .map_err(|e| FILE.translate("insert file", e))?;

    Ok(model.into())
}

pub(crate) async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> CatalogResult<FileRecord> {
    file::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| FILE.translate("load file", e))?
        .map(Into::into)
        .ok_or(CatalogError::RecordNotFound)
}
