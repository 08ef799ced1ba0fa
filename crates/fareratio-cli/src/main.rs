use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use fareratio_core::{find_best_flight, resolve_location, BestFlight, FlightApi, SearchWindow};
use fareratio_kiwi::KiwiClient;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fareratio")]
#[command(about = "Find the cheapest flight per kilometer (haversine distance)")]
struct Cli {
    /// Departure city name
    #[arg(long = "from", value_name = "CITY")]
    origin: String,

    /// One or more destination city names
    #[arg(long = "to", value_name = "CITY", num_args = 1.., required = true)]
    destinations: Vec<String>,
}

/// What a search run ended with.
#[derive(Debug, PartialEq)]
enum Outcome {
    OriginNotFound,
    NoFlights,
    Found(BestFlight),
}

impl Outcome {
    fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::OriginNotFound => ExitCode::from(1),
            Outcome::NoFlights | Outcome::Found(_) => ExitCode::SUCCESS,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = fareratio_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(
        origin = %cli.origin,
        destinations = cli.destinations.len(),
        currency = %config.currency,
        "starting fare search"
    );

    let client = KiwiClient::with_base_url(
        &config.kiwi_api_key,
        config.request_timeout_secs,
        &config.currency,
        &config.kiwi_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Tequila client: {e}"))?;

    let outcome = run_search(
        &client,
        &cli.origin,
        &cli.destinations,
        &SearchWindow::next_24h(),
        &mut std::io::stdout(),
    )
    .await?;

    Ok(outcome.exit_code())
}

/// Resolves the origin, searches every destination, and prints the winner.
///
/// An unresolved origin stops the run before any fare search.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
async fn run_search<A, W>(
    api: &A,
    origin: &str,
    destinations: &[String],
    window: &SearchWindow,
    out: &mut W,
) -> anyhow::Result<Outcome>
where
    A: FlightApi + Sync,
    W: Write,
{
    let Some(origin_location) = resolve_location(api, origin).await else {
        writeln!(out, "Error: Could not find origin city '{origin}'")?;
        return Ok(Outcome::OriginNotFound);
    };

    writeln!(
        out,
        "Searching from {} ({}) at coords {}...",
        origin_location.name, origin_location.code, origin_location.coordinates
    )?;

    match find_best_flight(api, &origin_location, destinations, window).await {
        Some(best) => {
            print_best_flight(out, &best)?;
            Ok(Outcome::Found(best))
        }
        None => {
            writeln!(out)?;
            writeln!(out, "No flights found within the next 24h.")?;
            Ok(Outcome::NoFlights)
        }
    }
}

fn print_best_flight<W: Write>(out: &mut W, best: &BestFlight) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Best Flight Found!")?;
    writeln!(out, "Destination: {}", best.destination)?;
    writeln!(out, "Total Price: ${}", best.price)?;
    writeln!(out, "Geo Distance: {} km", best.distance)?;
    writeln!(out, "Value: ${:.2}/km", best.ratio)
}
