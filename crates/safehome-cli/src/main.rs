use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use safehome_core::AppConfig;
use safehome_datasets::{average_rent, DataGoKrClient, SeoulDataClient};
use safehome_juso::{Address, JusoClient};

#[derive(Debug, Parser)]
#[command(name = "safehome-cli")]
#[command(about = "Rental-housing risk data lookups by road address")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a road address into the canonical jurisdiction/parcel record.
    Resolve {
        address: String,
        /// Free-text supplement (unit, floor) appended to the record.
        #[arg(long)]
        details: Option<String>,
    },
    /// Average rent prices for the resolved parcel.
    Price {
        address: String,
        #[arg(long, default_value_t = 2020)]
        start_year: i32,
        /// Rows sampled per year.
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    /// Building-ledger title record for the resolved parcel.
    Building { address: String },
    /// Flood statistics for the resolved city ward.
    Flood { address: String },
    /// Yearly average air quality, optionally scoped to one district.
    Air {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        gu: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = safehome_core::load_app_config_from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Resolve { address, details } => {
            let client = juso_client(&config)?;
            let mut record = Address::resolve(&client, &address).await;
            if let Some(details) = details {
                record = record.with_details(&details);
            }
            print_json(&record)?;
            anyhow::ensure!(record.is_valid(), "address could not be resolved: {address}");
        }
        Commands::Price {
            address,
            start_year,
            size,
        } => {
            let record = resolve_valid(&config, &address).await?;
            let seoul = seoul_client(&config)?;
            let avg = average_rent(&seoul, start_year, size, &record).await?;
            print_json(&avg)?;
        }
        Commands::Building { address } => {
            let record = resolve_valid(&config, &address).await?;
            let client = data_go_kr_client(&config)?;
            let ledger = client.building_ledger(&record).await?;
            print_json(&ledger)?;
        }
        Commands::Flood { address } => {
            let record = resolve_valid(&config, &address).await?;
            let client = data_go_kr_client(&config)?;
            let stats = client.flood_stats(&record).await?;
            print_json(&stats)?;
        }
        Commands::Air { year, gu } => {
            let seoul = seoul_client(&config)?;
            let rows = seoul.yearly_air_quality(year, 1, 25, gu.as_deref()).await?;
            print_json(&rows)?;
        }
    }

    Ok(())
}

fn juso_client(config: &AppConfig) -> anyhow::Result<JusoClient> {
    let client = JusoClient::with_base_url(
        &config.juso_confm_key,
        config.request_timeout_secs,
        &config.juso_base_url,
    )?
    .retry_policy(config.max_retries, config.retry_backoff_base_ms);
    Ok(client)
}

fn seoul_client(config: &AppConfig) -> anyhow::Result<SeoulDataClient> {
    let key = config
        .seoul_data_key
        .as_deref()
        .context("SEOUL_DATA_KEY is not set")?;
    Ok(SeoulDataClient::new(key, config.seoul_timeout_secs)?)
}

fn data_go_kr_client(config: &AppConfig) -> anyhow::Result<DataGoKrClient> {
    let key = config
        .data_go_kr_key
        .as_deref()
        .context("DATA_GO_KR_DECODING_KEY is not set")?;
    Ok(DataGoKrClient::new(key, config.request_timeout_secs)?)
}

/// Resolves and insists on a valid record; every dataset command
/// short-circuits here on an unresolvable address.
async fn resolve_valid(config: &AppConfig, road_address: &str) -> anyhow::Result<Address> {
    let client = juso_client(config)?;
    let record = Address::resolve(&client, road_address).await;
    anyhow::ensure!(
        record.is_valid(),
        "address could not be resolved: {road_address}"
    );
    Ok(record)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
