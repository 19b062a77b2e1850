mod expand;
mod load;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "estrella")]
#[command(about = "Product sample expander and star-schema loader")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Expand a seed sample into a larger, dated, Spanish-headed CSV
    Expand {
        /// Seed CSV (defaults to `ESTRELLA_SEED_CSV`)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Output CSV (defaults to `ESTRELLA_EXPANDED_CSV`)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Number of rows to sample (defaults to `ESTRELLA_SAMPLE_ROWS`)
        #[arg(long)]
        rows: Option<usize>,
        /// Year the synthetic dates fall in (defaults to `ESTRELLA_SAMPLE_YEAR`)
        #[arg(long)]
        year: Option<i32>,
        /// RNG seed for a reproducible run (defaults to `ESTRELLA_RNG_SEED`)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Build the star schema from an expanded CSV and replace it in the database
    Load {
        /// Expanded CSV (defaults to `ESTRELLA_EXPANDED_CSV`)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Build and print the data-quality report without touching the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Database utilities
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = estrella_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Some(Commands::Expand {
            input,
            output,
            rows,
            year,
            seed,
        }) => {
            let input = input.unwrap_or_else(|| config.seed_csv_path.clone());
            let output = output.unwrap_or_else(|| config.expanded_csv_path.clone());
            let options = expand::resolve_options(&config, rows, year, seed);
            expand::run_expand(&input, &output, &options)?;
        }
        Some(Commands::Load { input, dry_run }) => {
            let input = input.unwrap_or_else(|| config.expanded_csv_path.clone());
            load::run_load(&config, &input, dry_run).await?;
        }
        Some(Commands::Db {
            command: DbCommands::Ping,
        }) => {
            let pool = estrella_db::connect_pool_from_app_config(&config).await?;
            estrella_db::health_check(&pool).await?;
            pool.close().await;
            println!("database reachable");
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
