use database::postgres::{check_health_detailed, run_migrations, DatabaseConnection};
use domain_catalog::{
    Catalog, CategoryTree, CreateCategory, CreateProduct, PageRequest, RegisterFile,
    UpdateCategory, UpdateProduct, UpdateVariant,
};
use eyre::{Result, bail};
use migration::Migrator;
use serde::Serialize;
use tracing::info;

use crate::cli::{CategoryCommands, Commands, FileCommands, ProductCommands};
use crate::input::{read_json, validated};

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn run(command: Commands, db: &DatabaseConnection, catalog: &Catalog) -> Result<()> {
    match command {
        Commands::Migrate => {
            run_migrations::<Migrator>(db, "catalog").await?;
            info!("Catalog schema is up to date");
        }

        Commands::Health => {
            let status = check_health_detailed(db).await;
            println!(
                "healthy={} response_time_ms={}",
                status.healthy, status.response_time_ms
            );
            if !status.healthy {
                bail!(
                    "Database unhealthy: {}",
                    status.message.unwrap_or_default()
                );
            }
        }

        Commands::Products(command) => products(command, catalog).await?,
        Commands::Categories(command) => categories(command, catalog).await?,
        Commands::Files(command) => files(command, catalog).await?,
    }

    Ok(())
}

async fn products(command: ProductCommands, catalog: &Catalog) -> Result<()> {
    match command {
        ProductCommands::Create(source) => {
            let input: CreateProduct = read_json(&source.file)?;
            let product = catalog.products.create_product(input).await?;
            print_json(&product)?;
        }

        ProductCommands::Show { id } => {
            print_json(&catalog.products.get_product(id).await?)?;
        }

        ProductCommands::List { page, page_size } => {
            let page = catalog
                .products
                .list_products(PageRequest::new(page, page_size))
                .await?;
            info!(
                page = page.page,
                total_pages = page.total_pages(),
                total_count = page.total_count,
                "Listed products"
            );
            print_json(&page)?;
        }

        ProductCommands::Update { id, input } => {
            let update: UpdateProduct = read_json(&input.file)?;
            print_json(&catalog.products.update_product(id, update).await?)?;
        }

        ProductCommands::UpdateVariant { id, input } => {
            let update: UpdateVariant = read_json(&input.file)?;
            print_json(&catalog.products.update_variant(id, update).await?)?;
        }

        ProductCommands::Delete { id } => {
            catalog.products.delete_product(id).await?;
            println!("deleted {id}");
        }
    }

    Ok(())
}

async fn categories(command: CategoryCommands, catalog: &Catalog) -> Result<()> {
    match command {
        CategoryCommands::Create { name, parent } => {
            let input = validated(CreateCategory {
                name,
                parent_id: parent,
            })?;
            print_json(&catalog.categories.create_category(input).await?)?;
        }

        CategoryCommands::List => {
            let tree = catalog.categories.list_categories().await?;
            let mut lines = Vec::new();
            render_tree(&tree, 0, &mut lines);
            for line in lines {
                println!("{line}");
            }
        }

        CategoryCommands::Update {
            id,
            name,
            parent,
            detach,
        } => {
            let parent_id = match (parent, detach) {
                (_, true) => Some(None),
                (Some(parent), false) => Some(Some(parent)),
                (None, false) => None,
            };
            let input = validated(UpdateCategory { name, parent_id })?;
            print_json(&catalog.categories.update_category(id, input).await?)?;
        }

        CategoryCommands::Delete { id } => {
            catalog.categories.delete_category(id).await?;
            println!("deleted {id}");
        }
    }

    Ok(())
}

async fn files(command: FileCommands, catalog: &Catalog) -> Result<()> {
    match command {
        FileCommands::Register {
            name,
            mime_type,
            extension,
            size,
        } => {
            let input = validated(RegisterFile {
                original_name: name,
                mime_type,
                extension,
                size,
            })?;
            print_json(&catalog.files.register_file(input).await?)?;
        }

        FileCommands::Show { id } => {
            print_json(&catalog.files.get_file(id).await?)?;
        }
    }

    Ok(())
}

/// Indented `name (id)` lines, depth first.
fn render_tree(nodes: &[CategoryTree], depth: usize, lines: &mut Vec<String>) {
    for node in nodes {
        lines.push(format!("{}{} ({})", "  ".repeat(depth), node.name, node.id));
        render_tree(&node.children, depth + 1, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn node(name: &str, children: Vec<CategoryTree>) -> CategoryTree {
        let now = serde_json::from_str("\"2025-03-01T00:00:00Z\"").unwrap();
        CategoryTree {
            id: Uuid::nil(),
            name: name.to_string(),
            parent_id: None,
            created_at: now,
            updated_at: now,
            children,
        }
    }

    #[test]
    fn test_render_tree_indents_children() {
        let tree = vec![
            node("Apparel", vec![node("Shoes", vec![node("Trail", vec![])])]),
            node("Home", vec![]),
        ];

        let mut lines = Vec::new();
        render_tree(&tree, 0, &mut lines);

        let nil = Uuid::nil();
        assert_eq!(
            lines,
            vec![
                format!("Apparel ({nil})"),
                format!("  Shoes ({nil})"),
                format!("    Trail ({nil})"),
                format!("Home ({nil})"),
            ]
        );
    }
}
