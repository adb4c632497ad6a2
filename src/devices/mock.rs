//! Mock wall-sensor board
//!
//! Simulates the ADC front end for hardware-free testing: given a true
//! distance per sensor, produces the raw emitter-on/emitter-off pair the
//! real board would latch, by inverting the linearization and the log
//! response. Raw pairs can also be injected directly to exercise
//! degenerate readings.

use crate::config::SensingConfig;
use crate::core::driver::WallSensorAdc;
use crate::core::types::{LinearizationPair, SensorId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

/// Emitter-off ambient level for simulated samples
const AMBIENT_LEVEL: u16 = 120;

/// Simulated wall-sensor board
pub struct MockWallBoard {
    coefficients: [LinearizationPair; SensorId::COUNT],
    distances: [f32; SensorId::COUNT],
    raw_override: [Option<(u16, u16)>; SensorId::COUNT],
    noise: Option<Normal<f32>>,
    rng: StdRng,
}

impl MockWallBoard {
    /// Create a board simulating the configured sensors.
    ///
    /// All simulated distances start at one cell dimension (open maze
    /// around the robot).
    pub fn new(config: &SensingConfig) -> Self {
        let mut coefficients = [LinearizationPair::new(0.0, 0.0); SensorId::COUNT];
        for id in SensorId::ALL {
            coefficients[id.index()] = config.sensors.pair(id);
        }
        Self {
            coefficients,
            distances: [config.geometry.cell_dimension; SensorId::COUNT],
            raw_override: [None; SensorId::COUNT],
            noise: None,
            rng: StdRng::seed_from_u64(0x6268_6974),
        }
    }

    /// Add zero-mean Gaussian noise to the simulated distances.
    ///
    /// A non-finite or negative `std_dev` disables noise.
    pub fn with_noise(mut self, std_dev: f32) -> Self {
        self.noise = Normal::new(0.0, std_dev).ok();
        self
    }

    /// Set the true distance the sensor should observe, meters
    pub fn set_distance(&mut self, id: SensorId, meters: f32) {
        self.distances[id.index()] = meters;
        self.raw_override[id.index()] = None;
    }

    /// Inject a raw sample pair, bypassing the distance model
    pub fn set_raw(&mut self, id: SensorId, on: u16, off: u16) {
        self.raw_override[id.index()] = Some((on, off));
    }

    /// Raw differential the board would latch for a distance.
    ///
    /// Inverts `distance = a/response - b` and `response = ln(on - off)`.
    fn differential(&self, id: SensorId, distance: f32) -> u16 {
        let pair = self.coefficients[id.index()];
        let response = pair.a / (distance + pair.b);
        let delta = response.exp();
        if !delta.is_finite() || delta >= (u16::MAX - AMBIENT_LEVEL) as f32 {
            return u16::MAX - AMBIENT_LEVEL;
        }
        delta.round() as u16
    }

    fn simulated_distance(&mut self, id: SensorId) -> f32 {
        let mut distance = self.distances[id.index()];
        if let Some(noise) = self.noise {
            distance += self.rng.sample(noise);
        }
        distance
    }
}

impl WallSensorAdc for MockWallBoard {
    fn raw_on(&mut self, id: SensorId) -> u16 {
        if let Some((on, _)) = self.raw_override[id.index()] {
            return on;
        }
        let distance = self.simulated_distance(id);
        AMBIENT_LEVEL + self.differential(id, distance)
    }

    fn raw_off(&mut self, id: SensorId) -> u16 {
        if let Some((_, off)) = self.raw_override[id.index()] {
            return off;
        }
        AMBIENT_LEVEL
    }

    fn response(&self, on: u16, off: u16) -> f32 {
        (on.saturating_sub(off) as f32).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_raw_pair_round_trips_through_linearization() {
        let config = SensingConfig::default();
        let mut board = MockWallBoard::new(&config);

        for (id, distance) in [
            (SensorId::SideLeft, 0.08),
            (SensorId::SideRight, 0.12),
            (SensorId::FrontLeft, 0.15),
            (SensorId::FrontRight, 0.25),
        ] {
            board.set_distance(id, distance);
            let on = board.raw_on(id);
            let off = board.raw_off(id);
            let recovered = config.sensors.pair(id).distance(board.response(on, off));
            assert_relative_eq!(recovered, distance, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_closer_object_raises_response() {
        let config = SensingConfig::default();
        let mut board = MockWallBoard::new(&config);

        board.set_distance(SensorId::SideLeft, 0.05);
        let on_near = board.raw_on(SensorId::SideLeft);
        let near = board.response(on_near, AMBIENT_LEVEL);
        board.set_distance(SensorId::SideLeft, 0.15);
        let on_far = board.raw_on(SensorId::SideLeft);
        let far = board.response(on_far, AMBIENT_LEVEL);

        assert!(near > far);
        assert!(far > 0.0);
    }

    #[test]
    fn test_raw_override_wins() {
        let config = SensingConfig::default();
        let mut board = MockWallBoard::new(&config);

        board.set_raw(SensorId::FrontLeft, 300, 120);
        assert_eq!(board.raw_on(SensorId::FrontLeft), 300);
        assert_eq!(board.raw_off(SensorId::FrontLeft), 120);

        // set_distance clears the override
        board.set_distance(SensorId::FrontLeft, 0.2);
        assert_ne!(board.raw_off(SensorId::FrontLeft), 0);
    }

    #[test]
    fn test_noise_stays_bounded() {
        let config = SensingConfig::default();
        let mut board = MockWallBoard::new(&config).with_noise(0.001);
        board.set_distance(SensorId::SideLeft, 0.08);

        for _ in 0..50 {
            let on = board.raw_on(SensorId::SideLeft);
            let off = board.raw_off(SensorId::SideLeft);
            let recovered = config
                .sensors
                .pair(SensorId::SideLeft)
                .distance(board.response(on, off));
            assert!((recovered - 0.08).abs() < 0.01);
        }
    }
}
