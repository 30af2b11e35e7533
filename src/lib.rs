//! Clinic Locator Library
//!
//! Doctor discovery for a women's-health app: specialty classification of
//! directory places, opening-hours interpretation, and the directory client
//! that feeds them.

pub mod api;
pub mod config;
pub mod directory;
pub mod export;
pub mod hours;
pub mod search;
pub mod specialty;
pub mod traits;

// Re-export commonly used types
pub use api::{LatLng, Place, PlacesApiClient, PlacesError};
pub use config::AppConfig;
pub use directory::{DoctorDirectory, DoctorListing};
pub use hours::{OpeningHours, Period, TimePoint, format_availability, format_clock_time};
pub use search::{filter_listings, is_specialty_term};
pub use specialty::{SPECIALTY_LABELS, classify, join_specialties};
pub use traits::{Clock, MockClock, SystemClock};
