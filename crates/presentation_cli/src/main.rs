//! Route planner CLI
//!
//! Command-line front end for geocoding lookups, one-shot routes and
//! replaying scripted map interactions through a planning session.

#![allow(clippy::print_stdout)]

mod render;
mod replay;

use std::{path::PathBuf, sync::Arc};

use application::{
    ApplicationError, GeocodingPort, PlannerEvent, PlannerSnapshot, PlanningSession, RoutePlanner,
    require_user,
};
use clap::{Parser, Subcommand};
use domain::value_objects::{Coordinate, PointRole};
use infrastructure::{
    AppConfig, GeocodingAdapter, RoutingAdapter, StaticSessionAdapter, init_telemetry,
};
use tracing::{debug, info};

use crate::render::render_snapshot;

/// Route planner CLI
#[derive(Debug, Parser)]
#[command(name = "route-planner-cli")]
#[command(author, version, about = "Two-point route planner", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up a place by name
    Search {
        /// Free-text query, e.g. "Park Ave"
        query: String,
    },

    /// Look up the place name at a coordinate
    Reverse {
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },

    /// Plan a route between two searched places
    ///
    /// Example: route-planner-cli route --from "Park Ave" --to "5th Ave"
    Route {
        /// Start location query
        #[arg(long)]
        from: String,

        /// Destination query
        #[arg(long)]
        to: String,
    },

    /// Replay a JSON script of map interactions
    ///
    /// Prints the planner state after every change.
    Replay {
        /// Script file
        file: PathBuf,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn build_planner(config: &AppConfig) -> anyhow::Result<RoutePlanner> {
    let geocoder = GeocodingAdapter::with_config(&config.geocoding)?;
    let router = RoutingAdapter::with_config(&config.routing)?;
    Ok(RoutePlanner::with_viewport(
        Arc::new(geocoder),
        Arc::new(router),
        config.map.viewport()?,
    ))
}

fn print_snapshot(snapshot: &PlannerSnapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
    } else {
        println!("{}\n", render_snapshot(snapshot));
    }
    Ok(())
}

/// Error carrying only the message shown to the user
fn user_error(error: &ApplicationError) -> anyhow::Error {
    anyhow::anyhow!(error.user_message())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref())?;

    let mut telemetry = config.telemetry.clone();
    if cli.verbose > 0 {
        telemetry.log_filter = log_filter_from_verbosity(cli.verbose).to_string();
    }
    init_telemetry(&telemetry)?;

    if let Err(e) = config.validate() {
        anyhow::bail!("Invalid configuration: {e}");
    }

    let auth = StaticSessionAdapter::from_email(config.session.user_email.as_deref());

    match cli.command {
        Commands::Search { query } => {
            let geocoder = GeocodingAdapter::with_config(&config.geocoding)?;
            match geocoder.forward_geocode(&query).await {
                Ok(found) if cli.json => println!("{}", serde_json::to_string(&found)?),
                Ok(found) => println!("{} ({})", found.label, found.coordinate.to_label()),
                Err(e) => return Err(user_error(&e)),
            }
        },

        Commands::Reverse { lat, lng } => {
            let coordinate = Coordinate::new(lat, lng)?;
            let geocoder = GeocodingAdapter::with_config(&config.geocoding)?;
            let label = geocoder.reverse_geocode(coordinate).await;
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "coordinate": coordinate, "label": label })
                );
            } else {
                println!("{}", label.unwrap_or_else(|| coordinate.to_label()));
            }
        },

        Commands::Route { from, to } => {
            let user = require_user(&auth).map_err(|e| user_error(&e))?;
            debug!(user = %user.email, "planning route");

            let mut planner = build_planner(&config)?;
            let searches = [(PointRole::A, from), (PointRole::B, to)];
            for (role, query) in searches {
                planner
                    .settle(PlannerEvent::Search { role, query })
                    .await
                    .map_err(|e| user_error(&e))?;
            }

            let snapshot = planner.snapshot();
            print_snapshot(&snapshot, cli.json)?;
            if let Some(error) = snapshot.error {
                anyhow::bail!(error);
            }
        },

        Commands::Replay { file } => {
            let events = replay::load_script(&file)?;
            let planner = build_planner(&config)?;
            let (session, handle) =
                PlanningSession::start(&auth, planner, config.session.event_buffer)
                    .map_err(|e| user_error(&e))?;
            info!(user = %session.user().email, steps = events.len(), "replaying script");

            let mut updates = handle.subscribe();
            let json = cli.json;
            let printer = tokio::spawn(async move {
                print_snapshot(&updates.borrow_and_update(), json)?;
                while updates.changed().await.is_ok() {
                    let snapshot = updates.borrow_and_update().clone();
                    print_snapshot(&snapshot, json)?;
                }
                anyhow::Ok(())
            });
            let runner = tokio::spawn(session.run());

            for event in events {
                handle.send(event).await?;
            }
            drop(handle);

            let planner = runner.await?;
            printer.await??;
            debug!(epoch = %planner.epoch(), "replay finished");
        },
    }

    Ok(())
}
