//! Configuration for BhittiSense
//!
//! All constants ship with compiled-in defaults matching the production
//! robot; a TOML file can override any section. Every distance is in
//! meters.

use crate::core::types::{LinearizationPair, SensorId};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level sensing configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SensingConfig {
    /// Maze geometry
    #[serde(default)]
    pub geometry: GeometrySettings,

    /// Detection thresholds and deadbands
    #[serde(default)]
    pub detection: DetectionSettings,

    /// Lateral-sensor calibration settings
    #[serde(default)]
    pub calibration: CalibrationSettings,

    /// Per-sensor linearization coefficients
    #[serde(default)]
    pub sensors: SensorSettings,
}

/// Maze geometry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometrySettings {
    /// Side length of one maze cell
    pub cell_dimension: f32,

    /// Expected lateral distance from robot center to a wall when
    /// centered in a corridor
    pub middle_distance: f32,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            cell_dimension: 0.18,
            middle_distance: 0.08,
        }
    }
}

/// Detection thresholds, expressed as factors of the cell dimension
/// where they scale with the maze and as absolute distances where they
/// depend on robot geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionSettings {
    /// Side-wall threshold as a fraction of the cell dimension
    pub side_threshold_factor: f32,

    /// Front-wall threshold as a fraction of the cell dimension
    pub front_threshold_factor: f32,

    /// Minimum clearance to a diagonal pillar
    pub diagonal_min_distance: f32,

    /// Single-wall deadband on the far side
    pub far_deadband: f32,

    /// Single-wall deadband on the near side
    pub close_deadband: f32,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            side_threshold_factor: 0.90,
            front_threshold_factor: 1.5,
            diagonal_min_distance: 0.24,
            far_deadband: 0.1,
            close_deadband: 0.04,
        }
    }
}

/// Lateral-sensor calibration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationSettings {
    /// Number of distance samples to average
    pub readings: u32,

    /// Pause between samples, milliseconds
    pub sample_period_ms: u64,
}

impl CalibrationSettings {
    /// Pause between samples as a [`Duration`]
    pub fn sample_period(&self) -> Duration {
        Duration::from_millis(self.sample_period_ms)
    }
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            readings: 20,
            sample_period_ms: 5,
        }
    }
}

/// Per-sensor inverse-response coefficients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorSettings {
    /// Front-left coefficients
    pub front_left: LinearizationPair,
    /// Front-right coefficients
    pub front_right: LinearizationPair,
    /// Side-left coefficients
    pub side_left: LinearizationPair,
    /// Side-right coefficients
    pub side_right: LinearizationPair,
}

impl SensorSettings {
    /// Coefficient pair for a sensor
    pub fn pair(&self, id: SensorId) -> LinearizationPair {
        match id {
            SensorId::FrontLeft => self.front_left,
            SensorId::FrontRight => self.front_right,
            SensorId::SideLeft => self.side_left,
            SensorId::SideRight => self.side_right,
        }
    }
}

impl Default for SensorSettings {
    fn default() -> Self {
        // Values measured against the production sensor boards
        Self {
            front_left: LinearizationPair::new(1500.462, 138.777),
            front_right: LinearizationPair::new(1378.603, 124.503),
            side_left: LinearizationPair::new(2.806, 0.287),
            side_right: LinearizationPair::new(2.327, 0.231),
        }
    }
}

impl SensingConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: SensingConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Reject values the sensing loop cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.geometry.cell_dimension <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "cell_dimension must be positive, got {}",
                self.geometry.cell_dimension
            )));
        }
        if self.geometry.middle_distance <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "middle_distance must be positive, got {}",
                self.geometry.middle_distance
            )));
        }
        if self.calibration.readings == 0 {
            return Err(Error::InvalidParameter(
                "calibration readings must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Distance below which a side sensor reports a wall
    pub fn side_wall_threshold(&self) -> f32 {
        self.geometry.cell_dimension * self.detection.side_threshold_factor
    }

    /// Distance below which a front sensor reports a wall
    pub fn front_wall_threshold(&self) -> f32 {
        self.geometry.cell_dimension * self.detection.front_threshold_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SensingConfig::default();
        assert_eq!(config.geometry.cell_dimension, 0.18);
        assert_eq!(config.geometry.middle_distance, 0.08);
        assert_eq!(config.calibration.readings, 20);
        assert_eq!(config.calibration.sample_period_ms, 5);
        assert_eq!(config.sensors.side_left.a, 2.806);
        assert_eq!(config.sensors.front_right.b, 124.503);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_thresholds() {
        let config = SensingConfig::default();
        assert!((config.side_wall_threshold() - 0.162).abs() < 1e-6);
        assert!((config.front_wall_threshold() - 0.27).abs() < 1e-6);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SensingConfig::default();
        let toml_string = toml::to_string_pretty(&config).unwrap();

        assert!(toml_string.contains("[geometry]"));
        assert!(toml_string.contains("[detection]"));
        assert!(toml_string.contains("[calibration]"));
        assert!(toml_string.contains("[sensors.front_left]"));

        let parsed: SensingConfig = toml::from_str(&toml_string).unwrap();
        assert_eq!(parsed.geometry.cell_dimension, config.geometry.cell_dimension);
        assert_eq!(parsed.sensors.side_right.a, config.sensors.side_right.a);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_content = r#"
[geometry]
cell_dimension = 0.16
middle_distance = 0.07
"#;
        let config: SensingConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.geometry.cell_dimension, 0.16);
        // Untouched sections keep compiled-in values
        assert_eq!(config.calibration.readings, 20);
        assert_eq!(config.detection.diagonal_min_distance, 0.24);
    }

    #[test]
    fn test_validation_rejects_zero_readings() {
        let mut config = SensingConfig::default();
        config.calibration.readings = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sensor_pair_lookup() {
        let config = SensingConfig::default();
        for id in SensorId::ALL {
            let pair = config.sensors.pair(id);
            assert!(pair.a > 0.0);
        }
    }
}
