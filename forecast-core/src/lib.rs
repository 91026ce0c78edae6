//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over forecast point providers
//! - The StormGlass client and the normalized point model
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod model;
pub mod provider;

pub use config::{Config, StormGlassConfig};
pub use model::ForecastPoint;
pub use provider::storm_glass::{StormGlass, StormGlassError};
pub use provider::{PointProvider, provider_from_config};
