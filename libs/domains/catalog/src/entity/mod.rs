//! SeaORM entities, one module per catalog table.

pub mod entity_file;
pub mod file;
pub mod money_amount;
pub mod product;
pub mod product_category;
pub mod product_category_product;
pub mod product_option;
pub mod product_option_value;
pub mod product_variant;
pub mod product_variant_money_amount;
