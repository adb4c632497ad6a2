//! Distance engine, wall detection, and calibration
//!
//! Data flows one way: raw ADC pairs -> [`WallSensing`] -> shared distance
//! table -> [`WallDetector`] queries. The calibration routine feeds back
//! into the engine's offsets.

pub mod calibration;
pub mod detection;
pub mod distance;

pub use detection::WallDetector;
pub use distance::{DistanceTable, WallSensing};
