//! Core sensing types

use serde::{Deserialize, Serialize};

/// Identity of one of the four wall sensors.
///
/// The discriminant order matches the board wiring and indexes the
/// parallel coefficient/offset arrays, so it must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorId {
    /// Front-left, angled across the robot nose
    FrontLeft,
    /// Front-right, angled across the robot nose
    FrontRight,
    /// Side-left, perpendicular to the travel direction
    SideLeft,
    /// Side-right, perpendicular to the travel direction
    SideRight,
}

impl SensorId {
    /// Number of wall sensors on the board
    pub const COUNT: usize = 4;

    /// All sensors in index order
    pub const ALL: [SensorId; Self::COUNT] = [
        SensorId::FrontLeft,
        SensorId::FrontRight,
        SensorId::SideLeft,
        SensorId::SideRight,
    ];

    /// Array index for this sensor
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// True for the two side-facing sensors, which carry the additive
    /// calibration offset
    #[inline]
    pub fn is_lateral(self) -> bool {
        matches!(self, SensorId::SideLeft | SensorId::SideRight)
    }
}

/// Inverse-response linearization coefficients for one sensor.
///
/// Converts a positive response magnitude into a distance from the robot
/// center: `distance = a / response - b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearizationPair {
    /// Numerator coefficient
    pub a: f32,
    /// Subtractive coefficient
    pub b: f32,
}

impl LinearizationPair {
    /// Create a coefficient pair
    pub const fn new(a: f32, b: f32) -> Self {
        Self { a, b }
    }

    /// Map a response value to a distance in meters.
    ///
    /// Total function: a non-positive response (saturated or occluded
    /// sensor) produces an extreme or non-finite distance rather than an
    /// error. Downstream consumers treat such values as "no obstacle".
    #[inline]
    pub fn distance(&self, response: f32) -> f32 {
        self.a / response - self.b
    }
}

/// Snapshot of wall presence around the robot.
///
/// Produced fresh on every query from the current distance readings;
/// never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallsAround {
    /// Wall on the left side
    pub left: bool,
    /// Wall ahead
    pub front: bool,
    /// Wall on the right side
    pub right: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_index_order() {
        // Parallel arrays depend on this exact order
        assert_eq!(SensorId::FrontLeft.index(), 0);
        assert_eq!(SensorId::FrontRight.index(), 1);
        assert_eq!(SensorId::SideLeft.index(), 2);
        assert_eq!(SensorId::SideRight.index(), 3);
        assert_eq!(SensorId::ALL.len(), SensorId::COUNT);
    }

    #[test]
    fn test_lateral_sensors() {
        assert!(SensorId::SideLeft.is_lateral());
        assert!(SensorId::SideRight.is_lateral());
        assert!(!SensorId::FrontLeft.is_lateral());
        assert!(!SensorId::FrontRight.is_lateral());
    }

    #[test]
    fn test_linearization() {
        let pair = LinearizationPair::new(2.0, 0.5);
        assert_eq!(pair.distance(4.0), 0.0);
        assert_eq!(pair.distance(2.0), 0.5);
    }

    #[test]
    fn test_linearization_degenerate_response() {
        let pair = LinearizationPair::new(2.0, 0.5);
        // Response approaching zero blows up instead of panicking
        assert!(pair.distance(1e-9) > 1e8);
        assert!(pair.distance(0.0).is_infinite());
        assert!(pair.distance(f32::NEG_INFINITY) <= 0.0);
    }
}
