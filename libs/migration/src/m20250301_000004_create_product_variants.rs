use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductOption::Table)
                    .if_not_exists()
                    .col(pk_uuid(ProductOption::Id))
                    .col(uuid(ProductOption::ProductId))
                    .col(string(ProductOption::Title))
                    .col(
                        timestamp_with_time_zone(ProductOption::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(ProductOption::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("product_option_product_id_fkey")
                            .from(ProductOption::Table, ProductOption::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One option title per product
        manager
            .create_index(
                Index::create()
                    .name("duplicate_option_not_allowed")
                    .table(ProductOption::Table)
                    .col(ProductOption::ProductId)
                    .col(ProductOption::Title)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductVariant::Table)
                    .if_not_exists()
                    .col(pk_uuid(ProductVariant::Id))
                    .col(uuid(ProductVariant::ProductId))
                    .col(string(ProductVariant::Title))
                    .col(string_null(ProductVariant::Sku))
                    .col(string_null(ProductVariant::Barcode))
                    .col(integer(ProductVariant::InventoryQuantity).default(0))
                    .col(
                        timestamp_with_time_zone(ProductVariant::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(ProductVariant::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("product_variant_product_id_fkey")
                            .from(ProductVariant::Table, ProductVariant::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_product_variant_product_id")
                    .table(ProductVariant::Table)
                    .col(ProductVariant::ProductId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductOptionValue::Table)
                    .if_not_exists()
                    .col(pk_uuid(ProductOptionValue::Id))
                    .col(uuid(ProductOptionValue::OptionId))
                    .col(uuid(ProductOptionValue::VariantId))
                    .col(string(ProductOptionValue::Title))
                    .col(
                        timestamp_with_time_zone(ProductOptionValue::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(ProductOptionValue::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("product_option_value_option_id_fkey")
                            .from(ProductOptionValue::Table, ProductOptionValue::OptionId)
                            .to(ProductOption::Table, ProductOption::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("product_option_value_variant_id_fkey")
                            .from(ProductOptionValue::Table, ProductOptionValue::VariantId)
                            .to(ProductVariant::Table, ProductVariant::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One value per option on a variant
        manager
            .create_index(
                Index::create()
                    .name("duplicate_option_value_not_allowed")
                    .table(ProductOptionValue::Table)
                    .col(ProductOptionValue::VariantId)
                    .col(ProductOptionValue::OptionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MoneyAmount::Table)
                    .if_not_exists()
                    .col(pk_uuid(MoneyAmount::Id))
                    .col(string_len(MoneyAmount::CurrencyCode, 3))
                    .col(decimal_len(MoneyAmount::Amount, 19, 4))
                    .col(
                        timestamp_with_time_zone(MoneyAmount::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(MoneyAmount::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductVariantMoneyAmount::Table)
                    .if_not_exists()
                    .col(uuid(ProductVariantMoneyAmount::VariantId))
                    .col(uuid(ProductVariantMoneyAmount::MoneyAmountId))
                    .col(
                        timestamp_with_time_zone(ProductVariantMoneyAmount::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .name("product_variant_money_amount_pkey")
                            .col(ProductVariantMoneyAmount::VariantId)
                            .col(ProductVariantMoneyAmount::MoneyAmountId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("product_variant_money_amount_variant_id_fkey")
                            .from(
                                ProductVariantMoneyAmount::Table,
                                ProductVariantMoneyAmount::VariantId,
                            )
                            .to(ProductVariant::Table, ProductVariant::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("product_variant_money_amount_money_amount_id_fkey")
                            .from(
                                ProductVariantMoneyAmount::Table,
                                ProductVariantMoneyAmount::MoneyAmountId,
                            )
                            .to(MoneyAmount::Table, MoneyAmount::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductVariantMoneyAmount::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(MoneyAmount::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ProductOptionValue::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ProductVariant::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ProductOption::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Product {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum ProductOption {
    Table,
    Id,
    ProductId,
    Title,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProductVariant {
    Table,
    Id,
    ProductId,
    Title,
    Sku,
    Barcode,
    InventoryQuantity,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProductOptionValue {
    Table,
    Id,
    OptionId,
    VariantId,
    Title,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MoneyAmount {
    Table,
    Id,
    CurrencyCode,
    Amount,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProductVariantMoneyAmount {
    Table,
    VariantId,
    MoneyAmountId,
    CreatedAt,
}
