use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(File::Table)
                    .if_not_exists()
                    .col(pk_uuid(File::Id))
                    .col(string(File::OriginalName))
                    .col(string(File::MimeType))
                    .col(string(File::Extension))
                    .col(big_integer(File::Size))
                    .col(
                        timestamp_with_time_zone(File::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(File::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Generic attachment table: entity_id may point at any kind of row,
        // so only the file side carries a foreign key.
        manager
            .create_table(
                Table::create()
                    .table(EntityFile::Table)
                    .if_not_exists()
                    .col(uuid(EntityFile::EntityId))
                    .col(uuid(EntityFile::FileId))
                    .col(
                        timestamp_with_time_zone(EntityFile::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .name("entity_file_pkey")
                            .col(EntityFile::EntityId)
                            .col(EntityFile::FileId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("entity_file_file_id_fkey")
                            .from(EntityFile::Table, EntityFile::FileId)
                            .to(File::Table, File::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_entity_file_file_id")
                    .table(EntityFile::Table)
                    .col(EntityFile::FileId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EntityFile::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(File::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum File {
    Table,
    Id,
    OriginalName,
    MimeType,
    Extension,
    Size,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EntityFile {
    Table,
    EntityId,
    FileId,
    CreatedAt,
}
