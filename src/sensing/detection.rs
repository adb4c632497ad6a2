//! Wall detection and steering-error computation
//!
//! Pure queries over the shared distance table. Every function reads the
//! table once and derives its result from that single snapshot; nothing
//! here mutates state or caches results between calls.

use crate::config::SensingConfig;
use crate::core::types::{SensorId, WallsAround};
use crate::sensing::distance::DistanceTable;
use parking_lot::RwLock;
use std::sync::Arc;

/// Reader handle over the shared distance table.
///
/// Cheap to clone; each control-loop stage keeps its own. Thresholds are
/// resolved from the configuration at construction time.
#[derive(Clone)]
pub struct WallDetector {
    table: Arc<RwLock<DistanceTable>>,
    side_wall_threshold: f32,
    front_wall_threshold: f32,
    middle_distance: f32,
    diagonal_min_distance: f32,
    far_deadband: f32,
    close_deadband: f32,
}

impl WallDetector {
    pub(crate) fn new(config: &SensingConfig, table: Arc<RwLock<DistanceTable>>) -> Self {
        Self {
            table,
            side_wall_threshold: config.side_wall_threshold(),
            front_wall_threshold: config.front_wall_threshold(),
            middle_distance: config.geometry.middle_distance,
            diagonal_min_distance: config.detection.diagonal_min_distance,
            far_deadband: config.detection.far_deadband,
            close_deadband: config.detection.close_deadband,
        }
    }

    fn snapshot(&self) -> [f32; SensorId::COUNT] {
        let table = self.table.read();
        let mut distances = [0.0; SensorId::COUNT];
        for id in SensorId::ALL {
            distances[id.index()] = table.distance(id);
        }
        distances
    }

    /// Detect the existence or absence of the left wall
    pub fn left_wall_detection(&self) -> bool {
        self.table.read().distance(SensorId::SideLeft) < self.side_wall_threshold
    }

    /// Detect the existence or absence of the right wall
    pub fn right_wall_detection(&self) -> bool {
        self.table.read().distance(SensorId::SideRight) < self.side_wall_threshold
    }

    /// Detect the existence or absence of the front wall.
    ///
    /// Conjunctive: both front sensors must agree, which rejects a single
    /// sensor clipping a post or a diagonal wall edge.
    pub fn front_wall_detection(&self) -> bool {
        let table = self.table.read();
        table.distance(SensorId::FrontLeft) < self.front_wall_threshold
            && table.distance(SensorId::FrontRight) < self.front_wall_threshold
    }

    /// Left, front and right wall detection from one snapshot
    pub fn read_walls(&self) -> WallsAround {
        let d = self.snapshot();
        WallsAround {
            left: d[SensorId::SideLeft.index()] < self.side_wall_threshold,
            front: d[SensorId::FrontLeft.index()] < self.front_wall_threshold
                && d[SensorId::FrontRight.index()] < self.front_wall_threshold,
            right: d[SensorId::SideRight.index()] < self.side_wall_threshold,
        }
    }

    /// Estimated perpendicular distance to the frontal wall, meters
    pub fn front_wall_distance(&self) -> f32 {
        let d = self.snapshot();
        (d[SensorId::FrontLeft.index()] + d[SensorId::FrontRight.index()]) / 2.
    }

    /// Side sensors error when squeezed against one wall.
    ///
    /// With walls parallel to the robot, returns how far the robot has
    /// moved off the corridor center. Only fires when one side is closer
    /// than the reference and the other farther; the sign steers the
    /// robot back toward the center.
    pub fn side_sensors_close_error(&self) -> f32 {
        let d = self.snapshot();
        let left_error = d[SensorId::SideLeft.index()] - self.middle_distance;
        let right_error = d[SensorId::SideRight.index()] - self.middle_distance;

        if left_error > 0. && right_error < 0. {
            return right_error;
        }
        if right_error > 0. && left_error < 0. {
            return -left_error;
        }
        0.
    }

    /// Side sensors error when drifting away from a single remaining wall.
    ///
    /// Same structure as [`Self::side_sensors_close_error`] but with
    /// asymmetric deadbands so the correction does not chatter when only
    /// one wall is present.
    pub fn side_sensors_far_error(&self) -> f32 {
        let d = self.snapshot();
        let left_error = d[SensorId::SideLeft.index()] - self.middle_distance;
        let right_error = d[SensorId::SideRight.index()] - self.middle_distance;

        if left_error > self.far_deadband && right_error < self.close_deadband {
            return right_error;
        }
        if right_error > self.far_deadband && left_error < self.close_deadband {
            return -left_error;
        }
        0.
    }

    /// Front sensors error while approaching a perpendicular wall.
    ///
    /// Difference between the two front distances, or 0 when no front
    /// wall is detected regardless of the raw values.
    pub fn front_sensors_error(&self) -> f32 {
        let d = self.snapshot();
        let front_left = d[SensorId::FrontLeft.index()];
        let front_right = d[SensorId::FrontRight.index()];
        if !(front_left < self.front_wall_threshold && front_right < self.front_wall_threshold) {
            return 0.;
        }
        front_left - front_right
    }

    /// Diagonal sensors error near a pillar.
    ///
    /// Signed penetration below the minimum clearance, right branch
    /// checked first.
    pub fn diagonal_sensors_error(&self) -> f32 {
        let d = self.snapshot();
        let left_error = d[SensorId::FrontLeft.index()] - self.diagonal_min_distance;
        let right_error = d[SensorId::FrontRight.index()] - self.diagonal_min_distance;

        if right_error < 0. {
            return right_error;
        }
        if left_error < 0. {
            return -left_error;
        }
        0.
    }
}
