//! Types shared by every database module

pub mod error;

pub use error::{DatabaseError, DatabaseResult};
