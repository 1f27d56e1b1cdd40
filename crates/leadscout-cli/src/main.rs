mod audit;
mod leads;
mod populate;
mod search;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::leads::LeadsCommands;

#[derive(Debug, Parser)]
#[command(name = "leadscout")]
#[command(about = "Local-business lead discovery and website audits")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database administration
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Run one place search through the cache
    Search(search::SearchArgs),
    /// Run a batch of city x business-type searches from a plan file
    Populate {
        /// YAML plan with cities, types, and city selection
        #[arg(long, default_value = "config/populate.yaml")]
        plan: PathBuf,
        /// Skip this many generated queries
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Run at most this many queries
        #[arg(long)]
        limit: Option<usize>,
        /// Print the queries without calling the API
        #[arg(long)]
        dry_run: bool,
        /// Log per-query results at debug level only
        #[arg(long)]
        quiet: bool,
    },
    /// Audit websites of places that have not been audited yet
    Audit {
        /// Audit a single URL and print the result instead
        #[arg(long)]
        url: Option<String>,
        /// Audit at most this many places
        #[arg(long)]
        limit: Option<i64>,
        /// Log per-site results at debug level only
        #[arg(long)]
        quiet: bool,
    },
    /// Lead reports
    Leads {
        #[command(subcommand)]
        command: LeadsCommands,
    },
    /// Row counts across places, searches, and audits
    Stats,
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("leadscout: run with --help for available commands");
        return Ok(());
    };

    let config = leadscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(env = ?config.env, "configuration loaded");

    // A single-URL audit needs no database.
    if let Commands::Audit { url: Some(url), .. } = &command {
        return audit::run_audit_url(&config, url).await;
    }

    let database_url = config.require_database_url()?;
    let pool_config = leadscout_db::PoolConfig::from_app_config(&config);
    let pool = leadscout_db::connect_pool(database_url, pool_config).await?;

    match command {
        Commands::Db { command } => match command {
            DbCommands::Ping => {
                leadscout_db::ping(&pool).await?;
                println!("database ok");
            }
            DbCommands::Migrate => {
                let applied = leadscout_db::run_migrations(&pool).await?;
                println!("applied {applied} migration(s)");
            }
        },
        Commands::Search(args) => search::run_search(pool, &config, &args).await?,
        Commands::Populate {
            plan,
            offset,
            limit,
            dry_run,
            quiet,
        } => {
            populate::run_populate(pool, &config, &plan, offset, limit, dry_run, quiet).await?;
        }
        Commands::Audit { limit, quiet, .. } => {
            audit::run_bulk(pool, &config, limit, quiet).await?;
        }
        Commands::Leads { command } => leads::run_leads(&pool, command).await?,
        Commands::Stats => {
            let stats = leadscout_db::get_stats(&pool).await?;
            println!("places:          {}", stats.total_places);
            println!("  with website:  {}", stats.with_website);
            println!("  no website:    {}", stats.without_website);
            println!("searches:        {}", stats.total_searches);
            println!("site audits:     {}", stats.total_audits);
        }
    }

    Ok(())
}

/// Places client built from config; fails when no API key is configured.
fn places_client(
    config: &leadscout_core::AppConfig,
) -> anyhow::Result<leadscout_places::GooglePlacesClient> {
    let client = leadscout_places::GooglePlacesClient::new(
        config.google_maps_api_key.as_deref(),
        config.places_timeout_secs,
    )
    .map_err(|e| anyhow::anyhow!("failed to build places client: {e}"))?;
    Ok(client.with_page_size(config.places_page_size))
}
