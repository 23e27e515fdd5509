//! PostgreSQL connector and helpers
//!
//! Connection management, migrations, health checks, transactions and
//! structured access to constraint violations reported by the driver.

mod config;
mod connector;
mod health;
mod transaction;
mod violation;

pub use config::PostgresConfig;
pub use connector::{connect, connect_from_config, connect_with_options, run_migrations};
pub use health::{check_health, check_health_detailed, HealthStatus};
pub use transaction::{with_transaction, BoxFuture};
pub use violation::{ConstraintViolation, ViolationKind};

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DatabaseTransaction, DbErr};
pub use sea_orm_migration::MigratorTrait;
