use anyhow::Context;
use chrono::DateTime;
use clap::{Parser, Subcommand};
use forecast_core::{Config, ForecastPoint, provider_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Marine forecast CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the StormGlass API token used for requests.
    Configure,

    /// Show hourly forecast points for a coordinate.
    Show {
        /// Latitude in decimal degrees.
        lat: f64,

        /// Longitude in decimal degrees.
        lng: f64,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { lat, lng } => show(lat, lng).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_token = inquire::Password::new("StormGlass API token:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API token")?;

    config.set_storm_glass_token(api_token);
    config.save()?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

async fn show(lat: f64, lng: f64) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let points = provider.fetch_points(lat, lng).await?;

    if points.is_empty() {
        println!("No complete forecast points returned for {lat}, {lng}.");
        return Ok(());
    }

    for point in &points {
        println!("{}", format_point(point));
    }

    Ok(())
}

/// One line per hour. The upstream timestamp is RFC 3339; anything else is
/// printed verbatim.
fn format_point(point: &ForecastPoint) -> String {
    let time = DateTime::parse_from_rfc3339(&point.time)
        .map(|dt| dt.format("%Y-%m-%d %H:%M %:z").to_string())
        .unwrap_or_else(|_| point.time.clone());

    format!(
        "{time}  wave {:.2} m @ {:.0}°  swell {:.2} m / {:.1} s @ {:.0}°  wind {:.2} m/s @ {:.0}°",
        point.wave_height,
        point.wave_direction,
        point.swell_height,
        point.swell_period,
        point.swell_direction,
        point.wind_speed,
        point.wind_direction,
    )
}
