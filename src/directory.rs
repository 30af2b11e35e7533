//! Doctor discovery: fetch places from the directory and annotate them with
//! specialties and availability text.

use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use crate::api::{LatLng, Place, PlacesApiClient};
use crate::config::SearchConfig;
use crate::hours::format_availability;
use crate::search::{filter_by_name, filter_listings, is_specialty_term};
use crate::specialty::classify;
use crate::traits::Clock;

/// A place ready for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoctorListing {
    pub place_id: Option<String>,
    pub name: String,
    pub specialties: Vec<String>,
    pub availability: String,
    pub rating: Option<f64>,
    pub reviews: u32,
    pub vicinity: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub location: Option<LatLng>,
}

impl DoctorListing {
    /// Annotate a directory place as seen at `now`.
    pub fn from_place(place: &Place, now: &NaiveDateTime) -> Self {
        Self {
            place_id: place.place_id.clone(),
            name: place.name.clone(),
            specialties: classify(&place.name, &place.types)
                .into_iter()
                .map(str::to_string)
                .collect(),
            availability: format_availability(place.opening_hours.as_ref(), now),
            rating: place.rating,
            reviews: place.user_ratings_total.unwrap_or(0),
            vicinity: place.vicinity.clone(),
            phone: place.formatted_phone_number.clone(),
            website: place.website.clone(),
            location: place.location(),
        }
    }

    /// Comma-joined specialty badge text.
    pub fn specialty_badge(&self) -> String {
        let labels: Vec<&str> = self.specialties.iter().map(String::as_str).collect();
        crate::specialty::join_specialties(&labels)
    }
}

/// Searches the place directory and turns results into listings.
#[derive(Debug, Clone)]
pub struct DoctorDirectory<C: Clock> {
    client: PlacesApiClient,
    search: SearchConfig,
    clock: C,
}

impl<C: Clock> DoctorDirectory<C> {
    pub fn new(client: PlacesApiClient, search: SearchConfig, clock: C) -> Self {
        Self {
            client,
            search,
            clock,
        }
    }

    /// Medical places around `location`, in directory order.
    pub async fn nearby(&self, location: LatLng) -> Result<Vec<DoctorListing>> {
        tracing::info!(
            "Searching within {}m of {:.4},{:.4}",
            self.search.radius_meters,
            location.lat,
            location.lng
        );

        let summaries = self
            .client
            .nearby_search(location, self.search.radius_meters, &self.search.keyword)
            .await?;
        let places = self.with_details(summaries).await;

        Ok(self.annotate_all(&places))
    }

    /// Narrow or widen a set of nearby listings by a user search term.
    ///
    /// Specialty terms filter `nearby` locally. Any other term triggers a
    /// directory-wide text search; if that finds nothing (or fails), the
    /// nearby listings are filtered by name instead.
    pub async fn search(&self, term: &str, nearby: &[DoctorListing]) -> Vec<DoctorListing> {
        let term = term.trim();
        if term.is_empty() {
            return nearby.to_vec();
        }

        if is_specialty_term(term) {
            tracing::debug!("Treating {:?} as a specialty filter", term);
            return filter_listings(nearby, term).into_iter().cloned().collect();
        }

        let query = format!("{} {}", term, self.search.text_query_suffix);
        let summaries = match self.client.text_search(&query).await {
            Ok(mut results) => {
                results.truncate(self.search.text_result_limit);
                results
            }
            Err(e) => {
                tracing::warn!("Text search failed, filtering nearby results instead: {:#}", e);
                Vec::new()
            }
        };

        let places = self.with_details(summaries).await;
        if places.is_empty() {
            return filter_by_name(nearby, term).into_iter().cloned().collect();
        }

        self.annotate_all(&places)
    }

    fn annotate_all(&self, places: &[Place]) -> Vec<DoctorListing> {
        let now = self.clock.now_local();
        places
            .iter()
            .map(|place| DoctorListing::from_place(place, &now))
            .collect()
    }

    /// Fetch details for every summary concurrently, keeping input order.
    /// Places whose lookup fails are dropped.
    async fn with_details(&self, summaries: Vec<Place>) -> Vec<Place> {
        let mut tasks = JoinSet::new();

        for (index, summary) in summaries.into_iter().enumerate() {
            let client = self.client.clone();
            tasks.spawn(async move {
                let Some(place_id) = summary.place_id.clone() else {
                    tracing::warn!("Skipping {:?}: no place id", summary.name);
                    return None;
                };

                match client.place_details(&place_id).await {
                    Ok(details) => Some((index, summary.merge(details))),
                    Err(e) => {
                        tracing::warn!("Skipping place {}: {:#}", place_id, e);
                        None
                    }
                }
            });
        }

        let mut found = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(entry)) => found.push(entry),
                Ok(None) => {}
                Err(e) => tracing::warn!("Details task failed: {}", e),
            }
        }

        found.sort_by_key(|(index, _)| *index);
        found.into_iter().map(|(_, place)| place).collect()
    }
}
