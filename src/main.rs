use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use trip_scout::{ClientConfig, HotelSearchParams, TripClient};

#[derive(Parser)]
#[command(name = "trip-scout", about = "Hotel search, listings and reviews from trip.com")]
struct Cli {
    /// Proxy list, one user:pass@host:port per line [env: TRIP_PROXIES_FILE]
    #[arg(long, global = true)]
    proxies: Option<PathBuf>,

    /// Per-request timeout in seconds [env: TRIP_TIMEOUT_SECS, default: 30]
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Site root [env: TRIP_BASE_URL, default: https://www.trip.com]
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a keyword to a city code
    City { keyword: String },
    /// List hotels of a city
    Hotels {
        #[arg(long)]
        city_code: i64,
        #[arg(long)]
        city_name: String,
        #[arg(long)]
        check_in: String,
        #[arg(long)]
        check_out: String,
        #[arg(long, default_value_t = 2)]
        adults: u32,
        #[arg(long, default_value_t = 0)]
        children: u32,
    },
    /// Show the first page of reviews of a hotel
    Comments { hotel_id: i64 },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Flags win over the environment
    let mut config = ClientConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    if cli.proxies.is_some() {
        config.proxies_file = cli.proxies;
    }
    let client = TripClient::from_config(&config).context("Failed to create trip.com client")?;

    match cli.command {
        Command::City { keyword } => {
            let city = client
                .search_city(&keyword)
                .await
                .with_context(|| format!("City search for {:?} failed", keyword))?;
            print_json(&city)?;
        }
        Command::Hotels {
            city_code,
            city_name,
            check_in,
            check_out,
            adults,
            children,
        } => {
            let params = HotelSearchParams {
                city_code,
                city_name,
                check_in,
                check_out,
                adults,
                children,
            };
            let hotels = client
                .list_hotels(&params)
                .await
                .context("Hotel listing failed")?;
            info!("✅ Listed {} hotels", hotels.len());
            print_json(&hotels)?;
        }
        Command::Comments { hotel_id } => {
            let comments = client
                .list_comments(hotel_id)
                .await
                .with_context(|| format!("Fetching comments for hotel {} failed", hotel_id))?;
            print_json(&comments)?;
        }
    }

    Ok(())
}
