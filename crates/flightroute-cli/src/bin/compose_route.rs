//! Compose a runway-to-runway route from flight plan tokens.
//!
//! Example:
//!   compose_route --origin KAAA --origin-runway 09 --dest KBBB --dest-runway 27 \
//!       AAA1 ALPHA J1 ECHOO AUTO HOTEL BBB1

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use flightroute_cli::config::Config;
use flightroute_cli::format::RouteSummary;
use flightroute_core::{NavData, RandomRoutes, RouteComposer, RouteRequest};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Compose a flight route mixing waypoints with AUTO and RAND placeholders
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Navigation database (JSON); defaults to FLIGHTROUTE_NAVDATA
    #[arg(long)]
    navdata: Option<PathBuf>,

    /// Departure airport ICAO code
    #[arg(long)]
    origin: String,

    /// Departure runway
    #[arg(long)]
    origin_runway: String,

    /// Destination airport ICAO code
    #[arg(long)]
    dest: String,

    /// Arrival runway
    #[arg(long)]
    dest_runway: String,

    /// Seed for RAND segments; defaults to FLIGHTROUTE_RAND_SEED
    #[arg(long)]
    seed: Option<u64>,

    /// Print the route as JSON
    #[arg(long)]
    json: bool,

    /// Route tokens, e.g. `AUTO` or `ALPHA J1 ECHOO RAND HOTEL`
    #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
    route: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("flightroute_core=info".parse()?))
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    let path = args.navdata.unwrap_or_else(|| config.navdata_path.clone());
    let nav = NavData::load(&path)
        .with_context(|| format!("loading navigation data from {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        fixes = nav.fixes().len(),
        "Loaded navigation data"
    );
    if nav.fixes().is_empty() {
        tracing::warn!(path = %path.display(), "Navigation data has no waypoints");
    }

    let random_config = config.random_route_config();
    let random = match args.seed.or(config.rand_seed) {
        Some(seed) => RandomRoutes::with_seed(random_config, seed),
        None => RandomRoutes::new(random_config),
    };

    let tokens: Vec<&str> = args.route.iter().flat_map(|arg| arg.split_whitespace()).collect();
    let request = RouteRequest::new(
        &tokens,
        &args.origin,
        &args.origin_runway,
        &args.dest,
        &args.dest_runway,
    );

    let composer = RouteComposer::new(nav.collaborators(&random));
    let route = composer
        .compose(&request)
        .with_context(|| format!("composing route `{}`", tokens.join(" ")))?;

    let summary = RouteSummary::new(&route);
    if args.json {
        println!("{}", summary.to_json()?);
    } else {
        print!("{summary}");
    }
    Ok(())
}
