//! Analysis configuration.
//!
//! One serializable [`Config`] drives tiling construction and the sampling,
//! coverage and caching parameters used by the analyses. It loads from JSON
//! (and TOML with the `toml` feature) with per-field defaults.
use crate::tiling::cached::MAX_CACHE_PRECISION;
use crate::tiling::square::{GridMetric, MAX_RESOLUTION, SquareSizing};
use serde::de::Error;
use serde::{Deserialize, Serialize};

/// Analysis configuration
///
/// # Example
///
/// ```rust
/// use cellgroup::{Config, GridMetric};
///
/// let config = Config::default();
/// assert_eq!(config.resolution, 8);
///
/// let json = r#"{
///     "resolution": 9,
///     "square_metric": "chebyshev",
///     "square_sizing": { "mode": "halving", "base_degrees": 0.1 }
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.square_metric, GridMetric::Chebyshev);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Resolution for hexagon and square tilings (0-15)
    #[serde(default = "Config::default_resolution")]
    pub resolution: u8,

    /// Distance used for square grid k-rings
    #[serde(default)]
    pub square_metric: GridMetric,

    /// Side length rule for square cells
    #[serde(default)]
    pub square_sizing: SquareSizing,

    /// Geohash length for the geohash tiling (1-12)
    #[serde(default = "Config::default_geohash_precision")]
    pub geohash_precision: usize,

    /// Lattice step, in degrees, used when sampling a region for cells
    #[serde(default = "Config::default_sample_step_degrees")]
    pub sample_step_degrees: f64,

    /// Maximum k-ring explored when covering a circle
    #[serde(default = "Config::default_max_coverage_rings")]
    pub max_coverage_rings: u32,

    /// Decimal places kept when memoising point lookups
    #[serde(default = "Config::default_cache_precision")]
    pub cache_precision: u32,
}

impl Config {
    const fn default_resolution() -> u8 {
        8
    }

    const fn default_geohash_precision() -> usize {
        7
    }

    const fn default_sample_step_degrees() -> f64 {
        0.001
    }

    const fn default_max_coverage_rings() -> u32 {
        20
    }

    const fn default_cache_precision() -> u32 {
        4
    }

    pub fn with_resolution(mut self, resolution: u8) -> Self {
        assert!(
            resolution <= MAX_RESOLUTION,
            "Resolution must be between 0 and 15"
        );
        self.resolution = resolution;
        self
    }

    pub fn with_square_metric(mut self, metric: GridMetric) -> Self {
        self.square_metric = metric;
        self
    }

    pub fn with_square_sizing(mut self, sizing: SquareSizing) -> Self {
        self.square_sizing = sizing;
        self
    }

    pub fn with_geohash_precision(mut self, precision: usize) -> Self {
        assert!(
            (1..=12).contains(&precision),
            "Geohash precision must be between 1 and 12"
        );
        self.geohash_precision = precision;
        self
    }

    pub fn with_sample_step(mut self, step_degrees: f64) -> Self {
        assert!(
            step_degrees.is_finite() && step_degrees > 0.0,
            "Sample step must be positive and finite"
        );
        self.sample_step_degrees = step_degrees;
        self
    }

    pub fn with_max_coverage_rings(mut self, rings: u32) -> Self {
        self.max_coverage_rings = rings;
        self
    }

    pub fn with_cache_precision(mut self, precision: u32) -> Self {
        assert!(
            precision <= MAX_CACHE_PRECISION,
            "Cache precision must be at most {} decimals",
            MAX_CACHE_PRECISION
        );
        self.cache_precision = precision;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.resolution > MAX_RESOLUTION {
            return Err(format!(
                "Resolution must be between 0 and {}, got: {}",
                MAX_RESOLUTION, self.resolution
            ));
        }

        self.square_sizing.validate()?;

        if !(1..=12).contains(&self.geohash_precision) {
            return Err("Geohash precision must be between 1 and 12".to_string());
        }

        if !self.sample_step_degrees.is_finite() || self.sample_step_degrees <= 0.0 {
            return Err("Sample step must be positive and finite".to_string());
        }

        if self.cache_precision > MAX_CACHE_PRECISION {
            return Err(format!(
                "Cache precision must be at most {} decimals",
                MAX_CACHE_PRECISION
            ));
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: Self::default_resolution(),
            square_metric: GridMetric::default(),
            square_sizing: SquareSizing::default(),
            geohash_precision: Self::default_geohash_precision(),
            sample_step_degrees: Self::default_sample_step_degrees(),
            max_coverage_rings: Self::default_max_coverage_rings(),
            cache_precision: Self::default_cache_precision(),
        }
    }
}
