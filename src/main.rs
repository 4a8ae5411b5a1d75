//! CLI entry point for the rental listing statistics tool.
//!
//! Provides subcommands for plotting price against satisfaction, rank
//! correlation, host listing counts, room price changes across snapshots,
//! and neighborhood price averages.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use rental_stats::analyzers::types::CorrelationRecord;
use rental_stats::analyzers::{
    ENTIRE_HOME, NeighborhoodMode, histogram_buckets, host_listings, neighborhood_rows,
    num_listings, price_by_neighborhood, price_change, price_satisfaction, room_prices,
    series_rows,
};
use rental_stats::output::{append_record, print_json, print_pretty, write_records};
use rental_stats::plot::{PlotLabels, render_scatter};
use rental_stats::stats::correlation;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "rental_stats")]
#[command(about = "Descriptive statistics for short-term rental listing snapshots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scatter-plot price against overall satisfaction for reviewed listings
    Plot {
        /// Listing snapshot CSV
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// SVG file to write
        #[arg(short, long, default_value = "scatter.svg")]
        output: PathBuf,

        /// Chart title
        #[arg(long)]
        title: Option<String>,
    },
    /// Rank correlation between price and overall satisfaction
    Correlation {
        /// Listing snapshot CSV
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Optional: CSV file to append the result to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Count hosts by number of listings
    Hosts {
        /// Listing snapshot CSV
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Optional: CSV file to write the histogram to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Track room prices across dated snapshots and report the largest change
    RoomPrices {
        /// Snapshot CSVs named `...-YYYY-MM-DD.csv`, in any order
        #[arg(value_name = "FILES", required = true)]
        sources: Vec<PathBuf>,

        /// Room type to follow (exact match)
        #[arg(short, long, default_value = ENTIRE_HOME)]
        room_type: String,

        /// Optional: CSV file to write per-room series summaries to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Average "Entire home/apt" price per neighborhood
    Neighborhoods {
        /// Listing snapshot CSV
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Grouping behavior
        #[arg(short, long, value_enum, default_value_t = NeighborhoodMode::Grouped)]
        mode: NeighborhoodMode,

        /// Optional: CSV file to write the averages to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/rental_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("rental_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plot {
            source,
            output,
            title,
        } => {
            let points = price_satisfaction(&source)
                .with_context(|| format!("reading {}", source.display()))?;

            let labels = match title {
                Some(title) => PlotLabels::default().with_title(title),
                None => PlotLabels::default(),
            };
            render_scatter(&points, &output, &labels)
                .with_context(|| format!("rendering {}", output.display()))?;

            info!(points = points.len(), output = %output.display(), "Plot saved");
        }
        Commands::Correlation { source, output } => {
            let points = price_satisfaction(&source)
                .with_context(|| format!("reading {}", source.display()))?;
            let result = correlation(&points).context("computing rank correlation")?;

            print_json(&result)?;

            if let Some(output) = output {
                let record = CorrelationRecord {
                    timestamp: Utc::now(),
                    source: source.display().to_string(),
                    points: result.points,
                    coefficient: result.coefficient,
                    p_value: result.p_value,
                };
                append_record(&output, &record)?;
            }
        }
        Commands::Hosts { source, output } => {
            let listings = host_listings(&source)
                .with_context(|| format!("reading {}", source.display()))?;
            let histogram = num_listings(&listings);
            print_pretty(&histogram);

            let buckets = histogram_buckets(&histogram);
            for bucket in &buckets {
                info!(listings = bucket.listings, hosts = bucket.hosts, "Hosts by listing count");
            }
            info!(
                hosts = listings.len(),
                max_listings = histogram.len() - 1,
                "Host summary"
            );

            if let Some(output) = output {
                write_records(&output, &buckets)?;
            }
        }
        Commands::RoomPrices {
            sources,
            room_type,
            output,
        } => {
            let series = room_prices(&sources, &room_type).context("building room price series")?;

            if series.is_empty() {
                warn!(%room_type, "No listings of this room type found");
            } else {
                let change = price_change(&series).context("computing price change")?;
                print_json(&change)?;
            }

            if let Some(output) = output {
                write_records(&output, &series_rows(&series))?;
            }
        }
        Commands::Neighborhoods {
            source,
            mode,
            output,
        } => {
            let averages = price_by_neighborhood(&source, mode)
                .with_context(|| format!("reading {}", source.display()))?;
            let rows = neighborhood_rows(averages);

            for row in &rows {
                info!(
                    neighborhood = %row.neighborhood,
                    average_price = row.average_price,
                    "Neighborhood average"
                );
            }

            if let Some(output) = output {
                write_records(&output, &rows)?;
            }
        }
    }

    Ok(())
}
