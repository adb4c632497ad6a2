//! Hardware abstraction traits for the sensing loop
//!
//! The acquisition layer and the timing primitive live outside this crate.
//! These traits describe the contract the sensing code relies on; the
//! `devices` module provides a simulated implementation.

use crate::core::types::SensorId;
use std::time::Duration;

/// Raw access to the wall-sensor ADC front end.
///
/// The acquisition layer alternates the infrared emitters and latches one
/// emitter-on and one emitter-off sample per sensor each cycle. Both must
/// be readable for every [`SensorId`] on every call.
pub trait WallSensorAdc {
    /// Most recent emitter-on ADC sample for a sensor
    fn raw_on(&mut self, id: SensorId) -> u16;

    /// Most recent emitter-off ADC sample for a sensor
    fn raw_off(&mut self, id: SensorId) -> u16;

    /// Combine an on/off sample pair into a single response magnitude.
    ///
    /// Larger response means a closer object. The value is strictly
    /// positive for any physically valid separation; a degenerate pair
    /// may yield zero or a negative value, which the distance engine
    /// propagates rather than rejects.
    fn response(&self, on: u16, off: u16) -> f32;
}

/// Blocking delay primitive, used only by the calibration routine
pub trait Delay {
    /// Block the calling context for `period`
    fn wait(&mut self, period: Duration);
}

/// [`Delay`] backed by `std::thread::sleep`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDelay;

impl Delay for SystemDelay {
    fn wait(&mut self, period: Duration) {
        std::thread::sleep(period);
    }
}
