mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wms_cli::output::OutputFormat;

use commands::init::InitSource;

#[derive(Parser, Debug)]
#[command(author, version, about = "Warehouse picking-route utilities")]
struct Cli {
    /// Path to the warehouse SQLite database.
    #[arg(long, global = true, default_value = "wms.db")]
    db: PathBuf,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a warehouse database.
    Init {
        /// Fill the database with the demo distribution center.
        #[arg(long, conflicts_with = "from_json")]
        seed: bool,
        /// Import warehouses and products from a JSON export.
        #[arg(long = "from-json")]
        from_json: Option<PathBuf>,
        /// Replace an existing database file.
        #[arg(long)]
        force: bool,
    },
    /// List warehouses in the database.
    Warehouses,
    /// Order bins into a picking route, starting at the first bin given.
    Route {
        /// Warehouse identifier.
        #[arg(long, short)]
        warehouse: String,
        /// Bin codes to visit.
        #[arg(required = true, num_args = 1..)]
        bins: Vec<String>,
    },
    /// Compute the shortest path between two bins.
    Path {
        /// Warehouse identifier.
        #[arg(long, short)]
        warehouse: String,
        /// Starting bin code.
        #[arg(long = "from")]
        from: String,
        /// Destination bin code.
        #[arg(long = "to")]
        to: String,
    },
    /// List bins holding stock of a product.
    Available {
        /// Product SKU.
        #[arg(long)]
        sku: String,
        /// Quantity to pick.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(i64).range(1..))]
        quantity: i64,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Init {
            seed,
            from_json,
            force,
        } => {
            let source = match (&from_json, seed) {
                (Some(path), _) => InitSource::Json(path),
                (None, true) => InitSource::Demo,
                (None, false) => InitSource::Empty,
            };
            commands::init::handle_init(&cli.db, source, force, cli.format)
        }
        Command::Warehouses => commands::warehouses::handle_warehouses(&cli.db, cli.format),
        Command::Route { warehouse, bins } => {
            commands::route::handle_route(&cli.db, &warehouse, &bins, cli.format)
        }
        Command::Path {
            warehouse,
            from,
            to,
        } => commands::route::handle_path(&cli.db, &warehouse, &from, &to, cli.format),
        Command::Available { sku, quantity } => {
            commands::available::handle_available(&cli.db, &sku, quantity, cli.format)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
