//! BhittiSense - Wall sensing library for a maze-solving robot
//!
//! Converts raw proximity-sensor readings into calibrated distances from
//! the robot center, derives wall-presence flags and analog steering-error
//! signals for the closed-loop controllers, and provides a runtime
//! self-calibration procedure for the lateral sensors.
//!
//! ## Architecture
//!
//! - [`WallSensing`] is the distance engine: one instance per board, the
//!   single writer of the shared distance table. An external periodic
//!   caller invokes [`WallSensing::update_distance_readings`] once per
//!   control cycle.
//! - [`WallDetector`] handles are cheap clones that read the table from
//!   any control-loop stage.
//! - The ADC front end and the calibration delay are external
//!   collaborators behind the [`core::WallSensorAdc`] and [`core::Delay`]
//!   traits; [`devices::MockWallBoard`] simulates them for testing.

pub mod config;
pub mod core;
pub mod devices;
pub mod error;
pub mod sensing;

pub use config::SensingConfig;
pub use core::{Delay, SensorId, SystemDelay, WallSensorAdc, WallsAround};
pub use error::{Error, Result};
pub use sensing::{WallDetector, WallSensing};
