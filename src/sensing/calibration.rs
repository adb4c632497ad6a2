//! Lateral-sensor calibration
//!
//! Removes systematic bias from the side sensors by averaging fresh
//! readings while the robot sits centered in a straight corridor with
//! walls on both sides. The routine cannot verify that precondition;
//! calibrating in the wrong spot corrupts the offsets until a corrective
//! run.

use crate::core::driver::{Delay, WallSensorAdc};
use crate::core::types::SensorId;
use crate::sensing::distance::WallSensing;

impl WallSensing {
    /// Calibration for side sensors.
    ///
    /// Runs one acquisition pass per sample, so the window averages fresh
    /// lateral readings (sample count and period from the configuration),
    /// then adds each side's mean deviation from the mid-corridor
    /// reference onto its existing offset. Offsets accumulate across
    /// calls: repeated runs compound drift corrections instead of
    /// replacing them.
    ///
    /// Blocks the caller for the full window. Normal control-loop ticks
    /// must not run concurrently; the routine owns the engine for the
    /// duration.
    pub fn side_sensors_calibration<A: WallSensorAdc, D: Delay>(
        &mut self,
        adc: &mut A,
        delay: &mut D,
    ) {
        let readings = self.config().calibration.readings;
        let period = self.config().calibration.sample_period();
        let middle = self.config().geometry.middle_distance;

        let mut left_sum = 0.0;
        let mut right_sum = 0.0;
        for _ in 0..readings {
            self.update_distance_readings(adc);
            {
                let table = self.table().read();
                left_sum += table.distance(SensorId::SideLeft);
                right_sum += table.distance(SensorId::SideRight);
            }
            delay.wait(period);
        }

        let count = readings as f32;
        self.add_offset(SensorId::SideLeft, left_sum / count - middle);
        self.add_offset(SensorId::SideRight, right_sum / count - middle);
        log::info!(
            "side sensors calibrated: offsets left={:.4} right={:.4}",
            self.calibration_offset(SensorId::SideLeft),
            self.calibration_offset(SensorId::SideRight),
        );
    }
}
