//! Core types and hardware-abstraction traits

pub mod driver;
pub mod types;

pub use driver::{Delay, SystemDelay, WallSensorAdc};
pub use types::{LinearizationPair, SensorId, WallsAround};
