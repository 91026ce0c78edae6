use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Endpoint and credentials for the StormGlass API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StormGlassConfig {
    /// Base URL of the StormGlass REST API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Value sent verbatim in the `Authorization` header.
    pub api_token: String,
}

fn default_api_url() -> String {
    "https://api.stormglass.io/v2".to_string()
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// [storm_glass]
    /// api_url = "https://api.stormglass.io/v2"
    /// api_token = "..."
    pub storm_glass: Option<StormGlassConfig>,
}

impl Config {
    /// Return the StormGlass section, or a hint on how to create it.
    pub fn storm_glass(&self) -> Result<&StormGlassConfig> {
        self.storm_glass.as_ref().ok_or_else(|| {
            anyhow!(
                "No StormGlass credentials configured.\n\
                 Hint: run `forecast configure` and enter your API token first."
            )
        })
    }

    /// Set/replace the API token, keeping any previously configured URL.
    pub fn set_storm_glass_token(&mut self, api_token: String) {
        match &mut self.storm_glass {
            Some(storm_glass) => storm_glass.api_token = api_token,
            None => {
                self.storm_glass = Some(StormGlassConfig {
                    api_url: default_api_url(),
                    api_token,
                });
            }
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "surf-forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storm_glass_errors_when_not_configured() {
        let cfg = Config::default();
        let err = cfg.storm_glass().unwrap_err();

        assert!(err.to_string().contains("No StormGlass credentials configured"));
        assert!(err.to_string().contains("Hint: run `forecast configure`"));
    }

    #[test]
    fn set_token_fills_in_default_url() {
        let mut cfg = Config::default();

        cfg.set_storm_glass_token("TOKEN".into());

        let storm_glass = cfg.storm_glass().expect("section must exist");
        assert_eq!(storm_glass.api_url, "https://api.stormglass.io/v2");
        assert_eq!(storm_glass.api_token, "TOKEN");
    }

    #[test]
    fn set_token_keeps_custom_url() {
        let mut cfg = Config {
            storm_glass: Some(StormGlassConfig {
                api_url: "http://localhost:9090/v2".into(),
                api_token: "OLD".into(),
            }),
        };

        cfg.set_storm_glass_token("NEW".into());

        let storm_glass = cfg.storm_glass().expect("section must exist");
        assert_eq!(storm_glass.api_url, "http://localhost:9090/v2");
        assert_eq!(storm_glass.api_token, "NEW");
    }

    #[test]
    fn toml_round_trip() {
        let mut cfg = Config::default();
        cfg.set_storm_glass_token("TOKEN".into());

        let serialized = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&serialized).expect("parse");

        let storm_glass = parsed.storm_glass().expect("section must exist");
        assert_eq!(storm_glass.api_token, "TOKEN");
    }

    #[test]
    fn api_url_defaults_when_absent_from_file() {
        let parsed: Config = toml::from_str(
            "[storm_glass]\n\
             api_token = \"TOKEN\"\n",
        )
        .expect("parse");

        let storm_glass = parsed.storm_glass().expect("section must exist");
        assert_eq!(storm_glass.api_url, "https://api.stormglass.io/v2");
    }
}
