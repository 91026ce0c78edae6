use crate::{Config, ForecastPoint, provider::storm_glass::StormGlass};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod storm_glass;

/// A source of normalized hourly forecast points for a coordinate.
///
/// Implementations own their transport; callers may substitute the whole
/// provider in tests.
#[async_trait]
pub trait PointProvider: Send + Sync + Debug {
    async fn fetch_points(&self, lat: f64, lng: f64) -> anyhow::Result<Vec<ForecastPoint>>;
}

/// Construct the StormGlass-backed provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn PointProvider>> {
    let storm_glass = config.storm_glass()?;
    Ok(Box::new(StormGlass::from_config(storm_glass)))
}
