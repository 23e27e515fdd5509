//! Catalog Admin
//!
//! Command-line front end for the catalog: applies migrations, checks the
//! database and runs product, category and file operations. Structured input
//! is read as JSON and validated here before it reaches the catalog.

use clap::Parser;
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use database::postgres::{connect_from_config, PostgresConfig};
use domain_catalog::{Catalog, CatalogConfig};
use eyre::{Result, WrapErr};
use tracing::info;

mod cli;
mod commands;
mod input;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let cli = Cli::parse();

    let database_config = PostgresConfig::from_env().wrap_err("Invalid database configuration")?;
    let catalog_config = CatalogConfig::from_env().wrap_err("Invalid catalog configuration")?;

    if cli.metrics {
        observability::init_metrics()?;
    }

    info!("Connecting to database...");
    let db = connect_from_config(database_config)
        .await
        .wrap_err("Database connection failed")?;

    let catalog = Catalog::new(db.clone(), catalog_config);
    commands::run(cli.command, &db, &catalog).await?;

    if cli.metrics {
        print!("{}", observability::render_metrics());
    }

    Ok(())
}
