use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use tripfinder::{loader, Column, Params, Preferences, Recommendation, Recommender, TOP_K};

const MIN_BUDGET: i64 = 1000;
const MAX_BUDGET: i64 = 5000;
const MAX_DURATION: i64 = 14;

/// Recommend travel destinations close to your preferences
#[derive(Parser)]
#[command(name = "tripfinder")]
struct Cli {
    /// Destinations CSV
    #[arg(short, long, env = "TRIPFINDER_DATA", default_value = "data/destinations.csv")]
    data: PathBuf,

    /// Log filter, e.g. `info` or `tripfinder=debug`; falls back to `RUST_LOG`
    #[arg(long, env = "TRIPFINDER_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Closest destinations to the given preferences
    Recommend {
        /// Total budget in INR
        #[arg(long, value_parser = clap::value_parser!(u32).range(MIN_BUDGET..=MAX_BUDGET))]
        budget: u32,
        /// Trip length in days
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_DURATION))]
        duration: u32,
        #[arg(long = "type")]
        travel_type: String,
        #[arg(long)]
        climate: String,
        #[arg(long)]
        season: String,
        #[arg(long, default_value_t = TOP_K)]
        top: usize,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Values accepted for each categorical preference
    Options,
    /// Load the dataset and report dropped rows
    Check,
}

fn print_recommendation(result: &Recommendation) {
    println!("Top {} recommended destinations:", result.len());
    for (i, m) in result.matches.iter().enumerate() {
        let marker = if i == result.cheapest { "  (cheapest per day!)" } else { "" };
        println!("{}. {}{}", i + 1, m.record.name, marker);
        println!(
            "   cost {:.2}  days {}  per day {:.2}  {}  {}  (distance {:.3})",
            m.record.cost,
            m.record.duration_days,
            m.cost_per_day,
            m.record.travel_type,
            m.record.season,
            m.distance
        );
    }
    println!();
    println!(
        "{:<24} {:>10} {:>10} {:<12} {:<10} {:<10} {:>5}",
        "Destination", "Cost", "Cost/day", "Type", "Climate", "Season", "Days"
    );
    for m in &result.matches {
        let r = &m.record;
        println!(
            "{:<24} {:>10.2} {:>10.2} {:<12} {:<10} {:<10} {:>5}",
            r.name, r.cost, m.cost_per_day, r.travel_type, r.climate, r.season, r.duration_days
        );
    }
}

fn log_filter(level: Option<&str>) -> anyhow::Result<EnvFilter> {
    match level {
        Some(level) => EnvFilter::try_new(level).with_context(|| format!("invalid log filter {level:?}")),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(cli.log_level.as_deref())?)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(path = %cli.data.display(), "reading destinations");
    match cli.command {
        Commands::Recommend {
            budget,
            duration,
            travel_type,
            climate,
            season,
            top,
            json,
        } => {
            let report = loader::load_path(&cli.data)
                .with_context(|| format!("loading {}", cli.data.display()))?;
            let recommender = Recommender::with_params(report.records, Params { k: top })?;
            let prefs = Preferences {
                budget: f64::from(budget),
                duration_days: duration,
                travel_type,
                climate,
                season,
            };
            let result = recommender.recommend(&prefs)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_recommendation(&result);
            }
        }
        Commands::Options => {
            let recommender = Recommender::from_path(&cli.data)
                .with_context(|| format!("loading {}", cli.data.display()))?;
            for column in Column::ALL {
                println!("{}: {}", column.header(), recommender.options(column).join(", "));
            }
        }
        Commands::Check => {
            let report = loader::load_path(&cli.data)
                .with_context(|| format!("loading {}", cli.data.display()))?;
            println!("kept {} rows, dropped {}", report.records.len(), report.rejected.len());
            for (line, reason) in &report.rejected {
                println!("  line {line}: {reason}");
            }
        }
    }
    Ok(())
}
