//! CLI entry point.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use cli::commands::{ListGroups, RenameModel};
use cli::{build_client, demo_service};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "catalog-cli", about = "Catalog management commands")]
struct Cli {
    /// Principal the commands run as.
    #[arg(long, default_value = "anonymous", global = true)]
    actor: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lists all groups in a metalake.
    ListGroups {
        #[arg(long)]
        metalake: String,
    },
    /// Renames a model.
    RenameModel {
        #[arg(long)]
        metalake: String,
        #[arg(long)]
        catalog: String,
        #[arg(long)]
        schema: String,
        /// Current model name.
        model: String,
        /// New model name.
        new_name: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let service = Arc::new(demo_service().await);

    let result = match &cli.command {
        Commands::ListGroups { metalake } => {
            let client = build_client(Arc::clone(&service), metalake, &cli.actor);
            ListGroups::new(metalake).handle(&client).await
        }
        Commands::RenameModel {
            metalake,
            catalog,
            schema,
            model,
            new_name,
        } => {
            let client = build_client(Arc::clone(&service), metalake, &cli.actor);
            RenameModel::new(catalog, schema, model, new_name)
                .handle(&client)
                .await
        }
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
