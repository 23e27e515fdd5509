/// Errors raised while connecting to, checking or migrating the database.
///
/// Query-level failures inside the catalog are translated by the domain
/// crate; this type only covers infrastructure concerns.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[cfg(feature = "postgres")]
    #[error("Migrations for {app} failed: {source}")]
    MigrationFailed {
        app: String,
        #[source]
        source: sea_orm::DbErr,
    },
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
