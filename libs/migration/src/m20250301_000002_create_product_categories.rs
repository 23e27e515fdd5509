use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductCategory::Table)
                    .if_not_exists()
                    .col(pk_uuid(ProductCategory::Id))
                    .col(string(ProductCategory::Name))
                    .col(uuid_null(ProductCategory::ParentId))
                    .col(
                        timestamp_with_time_zone(ProductCategory::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(ProductCategory::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(ProductCategory::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("product_category_parent_id_fkey")
                            .from(ProductCategory::Table, ProductCategory::ParentId)
                            .to(ProductCategory::Table, ProductCategory::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_category_parent_id")
                    .table(ProductCategory::Table)
                    .col(ProductCategory::ParentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductCategory::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ProductCategory {
    Table,
    Id,
    Name,
    ParentId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
