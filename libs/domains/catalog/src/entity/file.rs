use crate::models::FileRecord;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "file")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub original_name: String,
    pub mime_type: String,
    pub extension: String,
    pub size: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for FileRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            original_name: model.original_name,
            mime_type: model.mime_type,
            extension: model.extension,
            size: model.size,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}
