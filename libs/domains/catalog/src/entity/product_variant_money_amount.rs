use sea_orm::entity::prelude::*;

/// Links a variant to one of its prices (one row per currency).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "product_variant_money_amount")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub variant_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub money_amount_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product_variant::Entity",
        from = "Column::VariantId",
        to = "super::product_variant::Column::Id"
    )]
    Variant,
    #[sea_orm(
        belongs_to = "super::money_amount::Entity",
        from = "Column::MoneyAmountId",
        to = "super::money_amount::Column::Id"
    )]
    MoneyAmount,
}

impl Related<super::product_variant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Variant.def()
    }
}

impl Related<super::money_amount::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MoneyAmount.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
