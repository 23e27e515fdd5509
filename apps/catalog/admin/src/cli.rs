use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "catalog-admin")]
#[command(about = "Manage the product catalog")]
pub struct Cli {
    /// Print Prometheus metrics after the command finishes
    #[arg(long, global = true)]
    pub metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending schema migrations
    Migrate,

    /// Check database connectivity
    Health,

    /// Product operations
    #[command(subcommand)]
    Products(ProductCommands),

    /// Category operations
    #[command(subcommand)]
    Categories(CategoryCommands),

    /// File record operations
    #[command(subcommand)]
    Files(FileCommands),
}

/// JSON input source; `-` reads stdin.
#[derive(Args, Debug)]
pub struct JsonInput {
    #[arg(short, long, default_value = "-")]
    pub file: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// Create a product graph from JSON
    Create(JsonInput),

    /// Show one product with variants, options, prices, categories and images
    Show { id: Uuid },

    /// List products, newest first
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u64,

        /// 0 uses the configured default
        #[arg(short = 's', long, default_value_t = 0)]
        page_size: u64,
    },

    /// Partially update a product from JSON
    Update {
        id: Uuid,
        #[command(flatten)]
        input: JsonInput,
    },

    /// Partially update a variant from JSON
    UpdateVariant {
        id: Uuid,
        #[command(flatten)]
        input: JsonInput,
    },

    /// Soft delete a product
    Delete { id: Uuid },
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        parent: Option<Uuid>,
    },

    /// Print the category tree
    List,

    Update {
        id: Uuid,

        #[arg(short, long)]
        name: Option<String>,

        /// Move under this parent
        #[arg(short, long, conflicts_with = "detach")]
        parent: Option<Uuid>,

        /// Make the category a root
        #[arg(long)]
        detach: bool,
    },

    /// Soft delete a category
    Delete { id: Uuid },
}

#[derive(Subcommand, Debug)]
pub enum FileCommands {
    /// Register an uploaded file so products can reference it
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        mime_type: String,

        #[arg(short, long)]
        extension: String,

        #[arg(short, long)]
        size: i64,
    },

    Show { id: Uuid },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_defaults() {
        let cli = Cli::try_parse_from(["catalog-admin", "products", "list"]).unwrap();

        match cli.command {
            Commands::Products(ProductCommands::List { page, page_size }) => {
                assert_eq!(page, 1);
                assert_eq!(page_size, 0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!cli.metrics);
    }

    #[test]
    fn test_update_reads_stdin_by_default() {
        let id = Uuid::now_v7();
        let cli = Cli::try_parse_from([
            "catalog-admin",
            "--metrics",
            "products",
            "update",
            &id.to_string(),
        ])
        .unwrap();

        match cli.command {
            Commands::Products(ProductCommands::Update { id: parsed, input }) => {
                assert_eq!(parsed, id);
                assert_eq!(input.file, PathBuf::from("-"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(cli.metrics);
    }

    #[test]
    fn test_parent_and_detach_conflict() {
        let id = Uuid::now_v7().to_string();
        let parent = Uuid::now_v7().to_string();

        let result = Cli::try_parse_from([
            "catalog-admin",
            "categories",
            "update",
            &id,
            "--parent",
            &parent,
            "--detach",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_malformed_id() {
        assert!(Cli::try_parse_from(["catalog-admin", "products", "show", "not-a-uuid"]).is_err());
    }
}
