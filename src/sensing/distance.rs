//! Distance engine
//!
//! Converts raw emitter-on/emitter-off ADC pairs into calibrated distances
//! from the robot center and publishes them through a shared table. The
//! engine is the table's only writer; detector handles are readers, and
//! the calibration routine pumps the engine itself to sample fresh
//! readings.

use crate::config::SensingConfig;
use crate::core::driver::WallSensorAdc;
use crate::core::types::{LinearizationPair, SensorId};
use crate::sensing::detection::WallDetector;
use parking_lot::RwLock;
use std::sync::Arc;

/// Latest distance reading per sensor.
///
/// Distances start at infinity (reads as "no wall anywhere") until the
/// first engine pass, and `updated` makes that state detectable.
#[derive(Debug)]
pub struct DistanceTable {
    distances: [f32; SensorId::COUNT],
    updated: bool,
}

impl DistanceTable {
    fn new() -> Self {
        Self {
            distances: [f32::INFINITY; SensorId::COUNT],
            updated: false,
        }
    }

    /// Distance for one sensor, meters
    #[inline]
    pub fn distance(&self, id: SensorId) -> f32 {
        self.distances[id.index()]
    }

    /// True once the engine has written at least one full pass
    #[inline]
    pub fn is_updated(&self) -> bool {
        self.updated
    }
}

/// Distance engine and calibration-offset state.
///
/// Owns the shared [`DistanceTable`] and the per-sensor offsets. Exactly
/// one `WallSensing` exists per sensor board; readers get cheap
/// [`WallDetector`] handles from [`WallSensing::detector`].
pub struct WallSensing {
    config: SensingConfig,
    coefficients: [LinearizationPair; SensorId::COUNT],
    offsets: [f32; SensorId::COUNT],
    table: Arc<RwLock<DistanceTable>>,
}

impl WallSensing {
    /// Create the engine with all offsets at zero
    pub fn new(config: SensingConfig) -> Self {
        let mut coefficients = [LinearizationPair::new(0.0, 0.0); SensorId::COUNT];
        for id in SensorId::ALL {
            coefficients[id.index()] = config.sensors.pair(id);
        }
        Self {
            config,
            coefficients,
            offsets: [0.0; SensorId::COUNT],
            table: Arc::new(RwLock::new(DistanceTable::new())),
        }
    }

    /// Calculate and update the distance from each sensor.
    ///
    /// One pass over all four sensors inside a single write lock, so a
    /// reader never observes a half-updated table. Degenerate responses
    /// (zero or negative) propagate as extreme or non-finite distances.
    pub fn update_distance_readings<A: WallSensorAdc>(&mut self, adc: &mut A) {
        let mut table = self.table.write();
        for id in SensorId::ALL {
            let on = adc.raw_on(id);
            let off = adc.raw_off(id);
            let response = adc.response(on, off);
            let mut distance = self.coefficients[id.index()].distance(response);
            if id.is_lateral() {
                distance -= self.offsets[id.index()];
            }
            table.distances[id.index()] = distance;
        }
        table.updated = true;
        log::trace!(
            "distances: fl={:.3} fr={:.3} sl={:.3} sr={:.3}",
            table.distances[SensorId::FrontLeft.index()],
            table.distances[SensorId::FrontRight.index()],
            table.distances[SensorId::SideLeft.index()],
            table.distances[SensorId::SideRight.index()],
        );
    }

    /// Distance for one sensor, meters
    pub fn distance(&self, id: SensorId) -> f32 {
        self.table.read().distance(id)
    }

    /// Get distance value from front left sensor
    pub fn front_left_distance(&self) -> f32 {
        self.distance(SensorId::FrontLeft)
    }

    /// Get distance value from front right sensor
    pub fn front_right_distance(&self) -> f32 {
        self.distance(SensorId::FrontRight)
    }

    /// Get distance value from side left sensor
    pub fn side_left_distance(&self) -> f32 {
        self.distance(SensorId::SideLeft)
    }

    /// Get distance value from side right sensor
    pub fn side_right_distance(&self) -> f32 {
        self.distance(SensorId::SideRight)
    }

    /// True once at least one full engine pass has run
    pub fn is_updated(&self) -> bool {
        self.table.read().is_updated()
    }

    /// Accumulated calibration offset for a sensor
    pub fn calibration_offset(&self, id: SensorId) -> f32 {
        self.offsets[id.index()]
    }

    /// New reader handle over the shared table
    pub fn detector(&self) -> WallDetector {
        WallDetector::new(&self.config, Arc::clone(&self.table))
    }

    pub(crate) fn config(&self) -> &SensingConfig {
        &self.config
    }

    pub(crate) fn table(&self) -> &Arc<RwLock<DistanceTable>> {
        &self.table
    }

    pub(crate) fn add_offset(&mut self, id: SensorId, delta: f32) {
        self.offsets[id.index()] += delta;
    }

    /// Overwrite the table directly, bypassing the ADC path
    #[cfg(test)]
    pub(crate) fn set_distances_for_test(&self, distances: [f32; SensorId::COUNT]) {
        let mut table = self.table.write();
        table.distances = distances;
        table.updated = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SensingConfig;
    use crate::devices::mock::MockWallBoard;
    use approx::assert_relative_eq;

    #[test]
    fn test_table_starts_unset() {
        let sensing = WallSensing::new(SensingConfig::default());
        assert!(!sensing.is_updated());
        for id in SensorId::ALL {
            assert!(sensing.distance(id).is_infinite());
        }
    }

    #[test]
    fn test_stored_distance_matches_formula_exactly() {
        let config = SensingConfig::default();
        let mut board = MockWallBoard::new(&config);
        let mut sensing = WallSensing::new(config.clone());

        board.set_distance(SensorId::SideLeft, 0.08);
        board.set_distance(SensorId::SideRight, 0.11);
        board.set_distance(SensorId::FrontLeft, 0.15);
        board.set_distance(SensorId::FrontRight, 0.21);
        sensing.update_distance_readings(&mut board);
        assert!(sensing.is_updated());

        // Stored value must equal a/response(on,off) - b bit for bit,
        // offsets being zero here
        for id in SensorId::ALL {
            let on = board.raw_on(id);
            let off = board.raw_off(id);
            let expected = config.sensors.pair(id).distance(board.response(on, off));
            assert_eq!(sensing.distance(id), expected);
        }
    }

    #[test]
    fn test_round_trip_through_mock_board() {
        let config = SensingConfig::default();
        let mut board = MockWallBoard::new(&config);
        let mut sensing = WallSensing::new(config);

        board.set_distance(SensorId::SideLeft, 0.065);
        board.set_distance(SensorId::SideRight, 0.095);
        board.set_distance(SensorId::FrontLeft, 0.13);
        board.set_distance(SensorId::FrontRight, 0.13);
        sensing.update_distance_readings(&mut board);

        assert_relative_eq!(sensing.side_left_distance(), 0.065, epsilon = 1e-3);
        assert_relative_eq!(sensing.side_right_distance(), 0.095, epsilon = 1e-3);
        assert_relative_eq!(sensing.front_left_distance(), 0.13, epsilon = 1e-3);
        assert_relative_eq!(sensing.front_right_distance(), 0.13, epsilon = 1e-3);
    }

    #[test]
    fn test_offset_applies_to_lateral_sensors_only() {
        let config = SensingConfig::default();
        let mut board = MockWallBoard::new(&config);
        let mut sensing = WallSensing::new(config);

        for id in SensorId::ALL {
            board.set_distance(id, 0.10);
        }
        sensing.add_offset(SensorId::SideLeft, 0.02);
        sensing.add_offset(SensorId::SideRight, -0.01);
        sensing.update_distance_readings(&mut board);

        assert_relative_eq!(sensing.side_left_distance(), 0.08, epsilon = 1e-3);
        assert_relative_eq!(sensing.side_right_distance(), 0.11, epsilon = 1e-3);
        // Front sensors never see the offsets
        assert_relative_eq!(sensing.front_left_distance(), 0.10, epsilon = 1e-3);
        assert_relative_eq!(sensing.front_right_distance(), 0.10, epsilon = 1e-3);
    }

    #[test]
    fn test_degenerate_raw_pair_does_not_panic() {
        let config = SensingConfig::default();
        let mut board = MockWallBoard::new(&config);
        let mut sensing = WallSensing::new(config);

        // on == off: zero differential, response is -inf
        board.set_raw(SensorId::SideLeft, 120, 120);
        // on just above off: response near zero, distance blows up
        board.set_raw(SensorId::SideRight, 121, 120);
        sensing.update_distance_readings(&mut board);

        assert!(!sensing.side_left_distance().is_nan());
        assert!(sensing.side_right_distance() > 1e3 || sensing.side_right_distance().is_infinite());
    }
}
