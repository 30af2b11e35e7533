use std::fmt::Write as _;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::directory::DoctorListing;
use crate::traits::Clock;

/// Flat CSV record for a listing.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    specialties: String,
    availability: &'a str,
    rating: Option<f64>,
    reviews: u32,
    vicinity: Option<&'a str>,
    phone: Option<&'a str>,
    website: Option<&'a str>,
    lat: Option<f64>,
    lng: Option<f64>,
}

impl<'a> From<&'a DoctorListing> for CsvRow<'a> {
    fn from(listing: &'a DoctorListing) -> Self {
        Self {
            name: &listing.name,
            specialties: listing.specialty_badge(),
            availability: &listing.availability,
            rating: listing.rating,
            reviews: listing.reviews,
            vicinity: listing.vicinity.as_deref(),
            phone: listing.phone.as_deref(),
            website: listing.website.as_deref(),
            lat: listing.location.map(|l| l.lat),
            lng: listing.location.map(|l| l.lng),
        }
    }
}

/// Heading shown above a list of listings.
pub fn heading(term: Option<&str>, count: usize) -> String {
    match term.map(str::trim).filter(|t| !t.is_empty()) {
        Some(term) => format!("Results for \"{term}\" ({count})"),
        None => format!("Nearby Clinics ({count})"),
    }
}

/// Plain-text listing for the terminal.
pub fn render_table(term: Option<&str>, listings: &[DoctorListing]) -> String {
    let mut out = heading(term, listings.len());
    out.push('\n');

    for listing in listings {
        let _ = writeln!(out, "\n{}", listing.name);
        let _ = writeln!(out, "  {}", listing.specialty_badge());
        let _ = writeln!(out, "  {}", listing.availability);
        if let Some(rating) = listing.rating {
            let _ = writeln!(out, "  ★ {} ({} reviews)", rating, listing.reviews);
        }
        if let Some(vicinity) = &listing.vicinity {
            let _ = writeln!(out, "  {vicinity}");
        }
        if let Some(phone) = &listing.phone {
            let _ = writeln!(out, "  {phone}");
        }
    }

    out
}

pub fn write_json<W: Write>(writer: W, listings: &[DoctorListing]) -> Result<()> {
    serde_json::to_writer_pretty(writer, listings).context("Failed to serialize listings as JSON")
}

pub fn write_csv<W: Write>(writer: W, listings: &[DoctorListing]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for listing in listings {
        wtr.serialize(CsvRow::from(listing))
            .context("Failed to serialize listing")?;
    }
    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// Write listings to a timestamped CSV file in `output_dir`.
///
/// # Returns
/// The path to the created CSV file on success.
pub fn export_to_csv<C: Clock>(
    output_dir: &Path,
    listings: &[DoctorListing],
    clock: &C,
) -> Result<PathBuf> {
    let filename = format!(
        "clinics_export_{}.csv",
        clock.now_local().format("%Y%m%d_%H%M%S")
    );
    let output_path = output_dir.join(filename);

    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    write_csv(file, listings)?;

    tracing::info!("Exported {} listings to {}", listings.len(), output_path.display());
    Ok(output_path)
}
