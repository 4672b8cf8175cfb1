use anyhow::{Context, Result};
use chrono::{DateTime, NaiveTime, Utc};
use clap::Parser;
use std::collections::HashSet;
use std::path::PathBuf;

use skyroute_core::{plan_route, ClassifierUnavailable, SafetyClassifier};
use skyroute_cli::{load_matrix, DurationTable};

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan a flight route over a city travel-time matrix")]
struct Args {
    /// Headered CSV matrix of travel minutes between cities
    #[arg(long)]
    matrix: PathBuf,

    /// Departure city
    #[arg(long)]
    start: String,

    /// Arrival city
    #[arg(long)]
    end: String,

    /// Departure time as HH:MM (today, UTC). Defaults to now.
    #[arg(long)]
    departure: Option<String>,

    /// City to treat as unsafe (repeatable). Stands in for the external
    /// weather classifier.
    #[arg(long = "unsafe")]
    unsafe_cities: Vec<String>,

    /// Emit the plan as JSON
    #[arg(long)]
    json: bool,
}

/// Classifier backed by an explicit city list instead of a weather model.
struct ListedUnsafe(HashSet<String>);

impl SafetyClassifier for ListedUnsafe {
    fn classify_unsafe(
        &self,
        city: &str,
        _at: DateTime<Utc>,
    ) -> Result<bool, ClassifierUnavailable> {
        Ok(self.0.contains(city))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let matrix = load_matrix(&args.matrix)?;
    let graph = matrix.to_graph()?;
    let durations = DurationTable::from(&matrix);
    let classifier = ListedUnsafe(args.unsafe_cities.iter().cloned().collect());

    let departure = match &args.departure {
        Some(hhmm) => {
            let time = NaiveTime::parse_from_str(hhmm, "%H:%M")
                .context("departure must be HH:MM")?;
            Utc::now().date_naive().and_time(time).and_utc()
        }
        None => Utc::now(),
    };

    let plan = plan_route(
        &graph,
        &args.start,
        &args.end,
        departure,
        &durations,
        &classifier,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    if let Some(advisory) = &plan.advisory {
        println!(
            "Delay takeoff: {} is unsafe at {}",
            advisory.city,
            advisory.at.format("%H:%M")
        );
    }

    match &plan.decision.primary {
        Some(primary) => {
            println!(
                "Primary path: {} ({} mins)",
                primary.cities.join(" -> "),
                primary.total_minutes
            );
            if let (Some(alternate), Some(city)) =
                (&plan.decision.alternate, &plan.decision.rerouted_at)
            {
                println!(
                    "Rerouted at {city}: {} ({} mins)",
                    alternate.cities.join(" -> "),
                    alternate.total_minutes
                );
            }
        }
        None => println!(
            "No path exists between {} and {}.",
            args.start, args.end
        ),
    }

    Ok(())
}
