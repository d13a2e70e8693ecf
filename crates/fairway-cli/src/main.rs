mod ingest;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fairway-cli")]
#[command(about = "Fairway offer-pipeline command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one full ingestion cycle: clear the collection, fetch, aggregate, write.
    Ingest {
        /// Override the configured query list (repeatable).
        #[arg(long = "query", value_name = "QUERY")]
        queries: Vec<String>,
    },
    /// Apply pending database migrations and exit.
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = fairway_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Ingest { queries } => ingest::run(&config, queries).await,
        Commands::Migrate => {
            let pool_config = fairway_store::PoolConfig::from_app_config(&config);
            let pool = fairway_store::connect_pool(&config.database_url, pool_config).await?;
            fairway_store::run_migrations(&pool).await?;
            println!("migrations applied");
            Ok(())
        }
    }
}
