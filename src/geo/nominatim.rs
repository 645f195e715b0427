//! Nominatim Client
//! Blocking reverse-geocoding client for the OpenStreetMap Nominatim API.

use crate::geo::{GeocodeError, ReverseGeocoder};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";
// Nominatim's usage policy requires an identifying User-Agent.
const USER_AGENT: &str = concat!("quakescope/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
// Zoom 5 resolves to state level, skipping street-level detail.
const STATE_ZOOM: &str = "5";

/// Structured address as returned by the reverse endpoint.
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    address: Option<Address>,
}

#[derive(Debug, Deserialize)]
struct Address {
    state: Option<String>,
}

/// Reverse geocoder backed by a Nominatim-compatible HTTP endpoint.
///
/// Lookups are synchronous; the client carries a fixed request timeout so a
/// hung service fails a single lookup instead of stalling the whole run.
pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl NominatimGeocoder {
    pub fn new() -> Result<Self, GeocodeError> {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Point the client at an alternate Nominatim deployment.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, GeocodeError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl ReverseGeocoder for NominatimGeocoder {
    fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<String>, GeocodeError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("format", "jsonv2"),
                ("lat", latitude.to_string().as_str()),
                ("lon", longitude.to_string().as_str()),
                ("zoom", STATE_ZOOM),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body: ReverseResponse = response.json()?;
        Ok(body.address.and_then(|address| address.state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_address_with_state() {
        let body: ReverseResponse = serde_json::from_str(
            r#"{"place_id": 1, "address": {"state": "California", "country": "United States"}}"#,
        )
        .unwrap();
        assert_eq!(
            body.address.and_then(|a| a.state).as_deref(),
            Some("California")
        );
    }

    #[test]
    fn decodes_address_without_state() {
        let body: ReverseResponse =
            serde_json::from_str(r#"{"address": {"country": "United States"}}"#).unwrap();
        assert_eq!(body.address.and_then(|a| a.state), None);
    }

    #[test]
    fn decodes_payload_without_address() {
        let body: ReverseResponse =
            serde_json::from_str(r#"{"error": "Unable to geocode"}"#).unwrap();
        assert!(body.address.is_none());
    }
}
