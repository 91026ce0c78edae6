use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client, header::AUTHORIZATION};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::{config::StormGlassConfig, model::ForecastPoint};

use super::PointProvider;

/// Quantities requested from the API, comma-joined into the `params` query value.
const API_PARAMS: &str =
    "swellDirection,swellHeight,swellPeriod,waveDirection,waveHeight,windDirection,windSpeed";

/// The single forecasting model whose readings survive normalization.
const API_SOURCE: &str = "noaa";

/// Errors raised by [`StormGlass::fetch_points`].
///
/// Both variants carry an internal code of 500; the HTTP status returned by
/// the service appears only in the `Response` message.
#[derive(Debug, Error)]
pub enum StormGlassError {
    /// The request never reached the service.
    #[error("Unexpected error when trying to communicate to StormGlass: {0}")]
    ClientRequest(String),

    /// The service answered with a non-success HTTP status.
    #[error("Unexpected error returned by the StormGlass service: Error: {body} Code: {status}")]
    Response { body: String, status: u16 },
}

impl StormGlassError {
    /// Internal error code reported to callers.
    pub fn code(&self) -> u16 {
        500
    }
}

/// Readings for one quantity, keyed by forecasting model name.
type PointSource = HashMap<String, f64>;

/// One hour of the forecast as returned by the service. Every field is
/// optional on the wire; absent fields decode to empty defaults and are
/// weeded out by [`normalize`].
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StormGlassPoint {
    time: String,
    wave_height: PointSource,
    wave_direction: PointSource,
    swell_direction: PointSource,
    swell_height: PointSource,
    swell_period: PointSource,
    wind_direction: PointSource,
    wind_speed: PointSource,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StormGlassForecastResponse {
    hours: Vec<StormGlassPoint>,
}

/// Thin client over the StormGlass point-forecast endpoint.
///
/// Holds no mutable state; concurrent `fetch_points` calls on one instance
/// are independent.
#[derive(Debug, Clone)]
pub struct StormGlass {
    http: Client,
    api_url: String,
    api_token: String,
}

impl StormGlass {
    /// Create a client using the given HTTP transport.
    pub fn new(http: Client, config: &StormGlassConfig) -> Self {
        Self {
            http,
            api_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
        }
    }

    /// Create a client with a default transport.
    pub fn from_config(config: &StormGlassConfig) -> Self {
        Self::new(Client::new(), config)
    }

    /// Fetch the hourly forecast for a coordinate, flattened to
    /// single-source points.
    ///
    /// Hours with an incomplete set of readings are dropped, so the result
    /// may be empty. Coordinates are passed through unvalidated.
    pub async fn fetch_points(
        &self,
        lat: f64,
        lng: f64,
    ) -> Result<Vec<ForecastPoint>, StormGlassError> {
        let url = format!("{}/weather/point", self.api_url);
        let lat = lat.to_string();
        let lng = lng.to_string();

        debug!(%url, %lat, %lng, "fetching StormGlass forecast points");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("params", API_PARAMS),
                ("source", API_SOURCE),
                ("lat", lat.as_str()),
                ("lng", lng.as_str()),
            ])
            .header(AUTHORIZATION, self.api_token.as_str())
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "StormGlass request failed before reaching the service");
                StormGlassError::ClientRequest(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), %body, "StormGlass returned an error status");
            return Err(StormGlassError::Response {
                body: compact_json(&body),
                status: status.as_u16(),
            });
        }

        let payload: StormGlassForecastResponse = response.json().await.map_err(|e| {
            error!(error = %e, "failed to decode StormGlass response body");
            StormGlassError::ClientRequest(e.to_string())
        })?;

        Ok(normalize(payload))
    }
}

#[async_trait]
impl PointProvider for StormGlass {
    async fn fetch_points(&self, lat: f64, lng: f64) -> anyhow::Result<Vec<ForecastPoint>> {
        Ok(StormGlass::fetch_points(self, lat, lng).await?)
    }
}

/// Drop incomplete hours and flatten the rest to the designated source,
/// preserving input order.
fn normalize(response: StormGlassForecastResponse) -> Vec<ForecastPoint> {
    response.hours.into_iter().filter_map(normalize_point).collect()
}

fn normalize_point(point: StormGlassPoint) -> Option<ForecastPoint> {
    if point.time.is_empty() {
        return None;
    }

    Some(ForecastPoint {
        wave_height: source_value(&point.wave_height)?,
        wave_direction: source_value(&point.wave_direction)?,
        swell_direction: source_value(&point.swell_direction)?,
        swell_height: source_value(&point.swell_height)?,
        swell_period: source_value(&point.swell_period)?,
        wind_direction: source_value(&point.wind_direction)?,
        wind_speed: source_value(&point.wind_speed)?,
        time: point.time,
    })
}

/// Reading for the designated source, if present.
///
/// A reading of exactly zero counts as missing, faithful to the upstream
/// validity rule for incomplete hours.
fn source_value(values: &PointSource) -> Option<f64> {
    values.get(API_SOURCE).copied().filter(|v| *v != 0.0)
}

/// Re-serialize an error body compactly so messages stay stable regardless
/// of upstream whitespace. Non-JSON bodies pass through as-is.
fn compact_json(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .map(|v| v.to_string())
        .unwrap_or_else(|_| body.to_string())
}
