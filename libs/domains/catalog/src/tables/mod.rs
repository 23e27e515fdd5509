//! Entity models: thin CRUD surfaces, one per table.
//!
//! Every function takes any [`sea_orm::ConnectionTrait`] so the same code runs
//! on the pool or inside an open transaction. Store failures leave here
//! already translated by the model's [`crate::constraints`] table.

pub(crate) mod category;
pub(crate) mod category_link;
pub(crate) mod file;
pub(crate) mod file_link;
pub(crate) mod option;
pub(crate) mod option_value;
pub(crate) mod price;
pub(crate) mod product;
pub(crate) mod variant;

use sea_orm::prelude::DateTimeWithTimeZone;

pub(crate) fn now() -> DateTimeWithTimeZone {
    chrono::Utc::now().into()
}
