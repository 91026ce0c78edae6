use serde::{Deserialize, Serialize};

/// One fully-populated hourly forecast point, flattened to a single
/// forecasting model.
///
/// `time` is the upstream timestamp carried verbatim; this crate never
/// interprets it. Field names serialize in the upstream camelCase spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub time: String,
    pub wave_height: f64,
    pub wave_direction: f64,
    pub swell_direction: f64,
    pub swell_height: f64,
    pub swell_period: f64,
    pub wind_direction: f64,
    pub wind_speed: f64,
}
