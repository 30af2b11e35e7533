use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clinic_locator::{
    Clock, DoctorDirectory, DoctorListing, LatLng, OpeningHours, PlacesApiClient,
    SPECIALTY_LABELS, SystemClock, classify, config::AppConfig, export, format_availability,
    join_specialties,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "clinic-locator")]
#[command(about = "Find nearby doctors and clinics by specialty and opening hours")]
struct Args {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List medical places around a location
    Nearby {
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Search nearby places by specialty, or the whole directory by name
    Search {
        term: String,
        #[command(flatten)]
        location: LocationArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the specialties a place name and its tags map to
    Classify {
        name: String,
        /// Directory category tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Print the availability text for an opening-hours JSON file
    Hours { file: PathBuf },
    /// List every specialty a place name can be classified into
    Specialties,
}

#[derive(clap::Args, Debug)]
struct LocationArgs {
    /// Latitude to search around
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Longitude to search around
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
    /// Also write a timestamped CSV export into this directory
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Table,
    Json,
    Csv,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
        .parse_lossy(if args.verbose {
            "clinic_locator=debug"
        } else {
            "clinic_locator=info"
        });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match args.command {
        Command::Classify { name, tags } => {
            println!("{}", join_specialties(&classify(&name, &tags)));
            Ok(())
        }
        Command::Hours { file } => print_hours(&file),
        Command::Specialties => {
            for label in SPECIALTY_LABELS {
                println!("{label}");
            }
            Ok(())
        }
        Command::Nearby { location, output } => run_lookup(None, location, output),
        Command::Search {
            term,
            location,
            output,
        } => run_lookup(Some(term), location, output),
    }
}

fn print_hours(file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let hours: OpeningHours =
        serde_json::from_str(&raw).context("Failed to parse opening hours JSON")?;

    println!("{}", format_availability(Some(&hours), &SystemClock.now_local()));
    Ok(())
}

/// Fetch nearby listings, optionally narrow them by a search term, and print.
fn run_lookup(term: Option<String>, location: LocationArgs, output: OutputArgs) -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    let api_key = config.places.require_api_key()?.to_string();

    let location = match (location.lat, location.lng) {
        (Some(lat), Some(lng)) => LatLng::new(lat, lng),
        _ => {
            tracing::warn!(
                "No location given, falling back to {},{}",
                config.location.fallback_lat,
                config.location.fallback_lng
            );
            LatLng::new(config.location.fallback_lat, config.location.fallback_lng)
        }
    };

    let client = PlacesApiClient::new(config.places.api_url.clone(), api_key, &config.network)?;
    tracing::info!("API client initialized");
    let directory = DoctorDirectory::new(client, config.search.clone(), SystemClock);

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let listings = rt.block_on(async {
        let nearby = directory.nearby(location).await?;
        let listings = match term.as_deref() {
            Some(term) => directory.search(term, &nearby).await,
            None => nearby,
        };
        Ok::<_, anyhow::Error>(listings)
    })?;

    print_listings(term.as_deref(), &listings, output.format)?;

    if let Some(dir) = output.export {
        let path = export::export_to_csv(&dir, &listings, &SystemClock)?;
        eprintln!("📁 Export saved to: {}", path.display());
    }

    Ok(())
}

fn print_listings(term: Option<&str>, listings: &[DoctorListing], format: Format) -> Result<()> {
    let stdout = std::io::stdout();
    match format {
        Format::Table => {
            print!("{}", export::render_table(term, listings));
            Ok(())
        }
        Format::Json => {
            export::write_json(stdout.lock(), listings)?;
            println!();
            Ok(())
        }
        Format::Csv => export::write_csv(stdout.lock(), listings),
    }
}
