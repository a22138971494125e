use crate::error::{Result, RotationError};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub rotation: RotationSettings,
}

/// Tunables for the rotation engine.
///
/// Every value has a default, so a config file only needs the keys it
/// changes. Tests override fields with struct update syntax.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RotationSettings {
    /// Need assumed when a planting has no recorded value (0-5 scale)
    pub neutral_need: u8,
    /// Interval used when a planted family is missing from the catalogue
    pub fallback_interval_years: u32,
    /// Years before the target year considered by the soil estimate
    pub soil_lookback_years: i32,
    /// Years before the target year included in the recent history view
    pub recent_history_years: i32,
    /// Average need strictly above this marks the nutrient depleted
    pub depleted_threshold: f64,
    /// Average need strictly below this marks the nutrient enriched
    pub enriched_threshold: f64,
    /// Nitrogen need at or above which a crop is a heavy feeder
    pub heavy_feeder_need: u8,
    pub nitrogen_fixing_family: String,
    pub nitrogen_fixer_score: u8,
    pub never_used_score: u8,
    pub score_per_year: u32,
    pub enriched_bonus: u8,
    /// Below this many years since use, the reason quotes the exact year
    pub exact_year_reason_below: i32,
    pub heavy_feeder_families: Vec<String>,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            neutral_need: 3,
            fallback_interval_years: 4,
            soil_lookback_years: 3,
            recent_history_years: 5,
            depleted_threshold: 4.0,
            enriched_threshold: 2.0,
            heavy_feeder_need: 4,
            nitrogen_fixing_family: "Fabacées".into(),
            nitrogen_fixer_score: 95,
            never_used_score: 80,
            score_per_year: 15,
            enriched_bonus: 10,
            exact_year_reason_below: 5,
            heavy_feeder_families: vec![
                "Solanaceae".into(),
                "Cucurbitaceae".into(),
                "Brassicaceae".into(),
                "Solanacées".into(),
                "Cucurbitacées".into(),
                "Brassicacées".into(),
            ],
        }
    }
}

impl RotationSettings {
    pub fn is_heavy_feeder_family(&self, family_id: &str) -> bool {
        self.heavy_feeder_families.iter().any(|f| f == family_id)
    }

    pub fn validate(&self) -> Result<()> {
        if self.neutral_need > crate::models::MAX_NUTRIENT_NEED {
            return Err(RotationError::Config(format!(
                "neutral_need {} is outside the 0-5 scale",
                self.neutral_need
            )));
        }
        if self.fallback_interval_years > crate::models::MAX_INTERVAL_YEARS {
            return Err(RotationError::Config(format!(
                "fallback_interval_years {} exceeds {}",
                self.fallback_interval_years,
                crate::models::MAX_INTERVAL_YEARS
            )));
        }
        if self.soil_lookback_years < 1 || self.recent_history_years < 0 {
            return Err(RotationError::Config(
                "lookback windows must be positive".into(),
            ));
        }
        if self.enriched_threshold > self.depleted_threshold {
            return Err(RotationError::Config(format!(
                "enriched_threshold ({}) must not exceed depleted_threshold ({})",
                self.enriched_threshold, self.depleted_threshold
            )));
        }
        for score in [
            self.nitrogen_fixer_score,
            self.never_used_score,
            self.enriched_bonus,
        ] {
            if score > 100 {
                return Err(RotationError::Config(format!(
                    "score {} exceeds 100",
                    score
                )));
            }
        }
        if self.nitrogen_fixing_family.trim().is_empty() {
            return Err(RotationError::Config(
                "nitrogen_fixing_family must not be empty".into(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration, falling back to defaults when no file exists.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(RotationError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| RotationError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::from_yaml(&config_str)?;
        tracing::debug!("Loaded config from {}", config_path.display());
        Ok(config)
    }

    /// Parse a YAML document after substituting `${VAR}` placeholders.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| RotationError::Config(format!("Failed to parse config: {}", e)))?;
        config.rotation.validate()?;

        Ok(config)
    }

    /// Search for a config file in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/croprota.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        let xdg_config = dirs::config_dir()?.join("croprota").join("config.yaml");
        xdg_config.exists().then_some(xdg_config)
    }

    /// Default path for writing new config files (~/.config/croprota/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RotationError::Config("Cannot determine config directory".into()))?
            .join("croprota");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        let defaults = RotationSettings::default();

        println!();
        println!("Crop rotation settings");

        let nitrogen_fixing_family: String = Input::new()
            .with_prompt("  Nitrogen-fixing family")
            .default(defaults.nitrogen_fixing_family.clone())
            .interact_text()
            .map_err(|e| RotationError::Config(format!("Input error: {}", e)))?;

        let fallback_interval_years: u32 = Input::new()
            .with_prompt("  Interval for families missing from the catalogue (years)")
            .default(defaults.fallback_interval_years)
            .interact_text()
            .map_err(|e| RotationError::Config(format!("Input error: {}", e)))?;

        let soil_lookback_years: i32 = Input::new()
            .with_prompt("  Soil lookback window (years)")
            .default(defaults.soil_lookback_years)
            .interact_text()
            .map_err(|e| RotationError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            rotation: RotationSettings {
                nitrogen_fixing_family,
                fallback_interval_years,
                soil_lookback_years,
                ..defaults
            },
        };
        config.rotation.validate()?;

        let config_path = Self::default_config_path()?;
        config.write_to(&config_path)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    pub fn write_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| RotationError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# croprota configuration\n# Generated by `croprota init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        Ok(())
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| RotationError::Config(format!("Invalid placeholder pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}
