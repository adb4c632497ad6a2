//! Device implementations of the hardware-abstraction traits

pub mod mock;

pub use mock::MockWallBoard;
