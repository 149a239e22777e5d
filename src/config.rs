// Configuration module for reading Snake.toml
// Scoring weights live here so tuning never touches the traversal code.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub appearance: AppearanceConfig,
    pub debug: DebugConfig,
}

/// Weights, exponents and multipliers for move scoring.
/// Bump `version` whenever a value changes so decision logs can be told apart.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScoringConfig {
    pub version: u32,

    // Additive components
    pub space_weight: f64,
    pub food_weight: f64,

    // Space: hazard and tail cells count as 1/danger_divisor of an open cell
    pub danger_divisor: f64,

    // Inverse power transforms for the food component
    pub food_exponent: i32,
    pub health_exponent: i32,

    // Multiplicative penalties
    pub tail_multiplier: f64,
    pub hazard_multiplier: f64,
    pub lethal_hazard_multiplier: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            version: 1,
            space_weight: 6.0,
            food_weight: 4.0,
            danger_divisor: 5.0,
            food_exponent: 5,
            health_exponent: 5,
            tail_multiplier: 0.8,
            hazard_multiplier: 0.1,
            lethal_hazard_multiplier: 0.0,
        }
    }
}

impl ScoringConfig {
    pub fn total_additive_weight(&self) -> f64 {
        self.space_weight + self.food_weight
    }
}

/// Values returned from GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
    pub version: String,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
    /// Log every candidate's score breakdown at info level
    pub verbose_decisions: bool,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config: Config =
            toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would break the score invariants
    fn validate(&self) -> Result<(), String> {
        let s = &self.scoring;
        if s.space_weight < 0.0 || s.food_weight < 0.0 || s.total_additive_weight() <= 0.0 {
            return Err("scoring weights must be non-negative with a positive sum".to_string());
        }
        if s.danger_divisor <= 0.0 {
            return Err("scoring.danger_divisor must be positive".to_string());
        }
        if s.food_exponent < 1 || s.health_exponent < 1 {
            return Err("scoring exponents must be at least 1".to_string());
        }
        for (name, value) in &[
            ("tail_multiplier", s.tail_multiplier),
            ("hazard_multiplier", s.hazard_multiplier),
            ("lethal_hazard_multiplier", s.lethal_hazard_multiplier),
        ] {
            if !(0.0..=1.0).contains(value) {
                return Err(format!("scoring.{} must be within [0, 1], got {}", name, value));
            }
        }
        // Entering a hazard that kills us is never a viable move
        if s.lethal_hazard_multiplier != 0.0 {
            return Err(format!(
                "scoring.lethal_hazard_multiplier must be 0, got {}",
                s.lethal_hazard_multiplier
            ));
        }
        Ok(())
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            scoring: ScoringConfig::default(),
            appearance: AppearanceConfig {
                author: "flood-snake".to_string(),
                color: "#0069ff".to_string(),
                head: "default".to_string(),
                tail: "default".to_string(),
                version: "1.0.0".to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
                verbose_decisions: false,
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!("Warning: Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
