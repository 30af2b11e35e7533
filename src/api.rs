use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::config::NetworkConfig;
use crate::hours::OpeningHours;

/// Fields requested from the details endpoint.
const DETAIL_FIELDS: &str = "place_id,name,formatted_phone_number,opening_hours,website,rating,user_ratings_total,vicinity,geometry,types";

/// Errors reported by the place directory inside a successful HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacesError {
    #[error("Places API returned {status}: {message}")]
    Status { status: String, message: String },
    #[error("Places API returned no details for place {0}")]
    MissingResult(String),
}

/// A geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

/// A place record as returned by search and details lookups.
///
/// Search results carry only a subset of fields; details fill in the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u32>,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl Place {
    /// Overlay a details record on top of a search result. Fields present in
    /// `details` win; missing ones keep the search value.
    pub fn merge(self, details: Place) -> Place {
        Place {
            place_id: details.place_id.or(self.place_id),
            name: if details.name.is_empty() {
                self.name
            } else {
                details.name
            },
            types: if details.types.is_empty() {
                self.types
            } else {
                details.types
            },
            opening_hours: details.opening_hours.or(self.opening_hours),
            rating: details.rating.or(self.rating),
            user_ratings_total: details.user_ratings_total.or(self.user_ratings_total),
            vicinity: details.vicinity.or(self.vicinity),
            formatted_phone_number: details.formatted_phone_number.or(self.formatted_phone_number),
            website: details.website.or(self.website),
            geometry: details.geometry.or(self.geometry),
        }
    }

    pub fn location(&self) -> Option<LatLng> {
        self.geometry.map(|g| g.location)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<Place>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    result: Option<Place>,
    #[serde(default)]
    error_message: Option<String>,
}

fn check_status(status: &str, error_message: Option<String>) -> Result<(), PlacesError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(PlacesError::Status {
            status: other.to_string(),
            message: error_message.unwrap_or_else(|| "no error message".to_string()),
        }),
    }
}

/// API client for the place directory.
#[derive(Clone, Debug)]
pub struct PlacesApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PlacesApiClient {
    /// Create a new API client with configurable timeouts.
    pub fn new(base_url: String, api_key: String, network_config: &NetworkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(network_config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(network_config.connect_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Places matching `keyword` within `radius_m` metres of `location`.
    pub async fn nearby_search(
        &self,
        location: LatLng,
        radius_m: u32,
        keyword: &str,
    ) -> Result<Vec<Place>> {
        let location = format!("{},{}", location.lat, location.lng);
        let radius = radius_m.to_string();
        let response: SearchResponse = self
            .get_json(
                "nearbysearch/json",
                &[
                    ("location", location.as_str()),
                    ("radius", radius.as_str()),
                    ("keyword", keyword),
                ],
            )
            .await
            .context("Nearby search failed")?;

        check_status(&response.status, response.error_message)?;
        tracing::debug!("Nearby search returned {} places", response.results.len());
        Ok(response.results)
    }

    /// Free-text search across the whole directory.
    pub async fn text_search(&self, query: &str) -> Result<Vec<Place>> {
        let response: SearchResponse = self
            .get_json("textsearch/json", &[("query", query)])
            .await
            .context("Text search failed")?;

        check_status(&response.status, response.error_message)?;
        tracing::debug!("Text search for {:?} returned {} places", query, response.results.len());
        Ok(response.results)
    }

    /// Full record for a single place.
    pub async fn place_details(&self, place_id: &str) -> Result<Place> {
        let response: DetailsResponse = self
            .get_json(
                "details/json",
                &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
            )
            .await
            .with_context(|| format!("Details lookup failed for place {place_id}"))?;

        check_status(&response.status, response.error_message)?;
        let place = response
            .result
            .ok_or_else(|| PlacesError::MissingResult(place_id.to_string()))?;
        Ok(place)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut query: Vec<(&str, &str)> = params.to_vec();
        query.push(("key", self.api_key.as_str()));
        let url = reqwest::Url::parse_with_params(&url, &query)
            .with_context(|| format!("Invalid Places API URL: {url}"))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request to Places API")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("API returned error status: {}", status);
        }

        response
            .json::<T>()
            .await
            .context("Failed to parse Places API response")
    }
}
