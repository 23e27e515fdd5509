use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(ProductStatus::Enum)
                    .values([ProductStatus::Draft, ProductStatus::Published])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(pk_uuid(Product::Id))
                    .col(string(Product::Title))
                    .col(string_null(Product::Subtitle))
                    .col(text(Product::Description))
                    .col(uuid_null(Product::ThumbnailId))
                    .col(
                        ColumnDef::new(Product::Status)
                            .enumeration(
                                ProductStatus::Enum,
                                [ProductStatus::Draft, ProductStatus::Published],
                            )
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        timestamp_with_time_zone(Product::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Product::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Product::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("product_thumbnail_id_fkey")
                            .from(Product::Table, Product::ThumbnailId)
                            .to(File::Table, File::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing pages are ordered newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_product_created_at")
                    .table(Product::Table)
                    .col(Product::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductCategoryProduct::Table)
                    .if_not_exists()
                    .col(uuid(ProductCategoryProduct::ProductCategoryId))
                    .col(uuid(ProductCategoryProduct::ProductId))
                    .primary_key(
                        Index::create()
                            .name("product_category_product_pkey")
                            .col(ProductCategoryProduct::ProductCategoryId)
                            .col(ProductCategoryProduct::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("product_category_product_category_id_fkey")
                            .from(
                                ProductCategoryProduct::Table,
                                ProductCategoryProduct::ProductCategoryId,
                            )
                            .to(ProductCategory::Table, ProductCategory::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("product_category_product_product_id_fkey")
                            .from(ProductCategoryProduct::Table, ProductCategoryProduct::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_category_product_product_id")
                    .table(ProductCategoryProduct::Table)
                    .col(ProductCategoryProduct::ProductId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductCategoryProduct::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Product::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ProductStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Product {
    Table,
    Id,
    Title,
    Subtitle,
    Description,
    ThumbnailId,
    Status,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum ProductStatus {
    #[sea_orm(iden = "product_status")]
    Enum,
    #[sea_orm(iden = "draft")]
    Draft,
    #[sea_orm(iden = "published")]
    Published,
}

#[derive(DeriveIden)]
enum ProductCategoryProduct {
    Table,
    ProductCategoryId,
    ProductId,
}

#[derive(DeriveIden)]
enum ProductCategory {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum File {
    Table,
    Id,
}
