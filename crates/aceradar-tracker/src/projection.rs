//! Coordinate transform: world pose → viewport-local blip placement.
//!
//! The observer-relative offset is computed once per target per frame at
//! display scale for the reference radius, then divided by each viewport's
//! own radius. Every viewport therefore agrees on the underlying offset.

use glam::{DQuat, DVec2};

use aceradar_core::constants::{DISPLAY_UNITS_PER_RADIUS, REFERENCE_RADIUS};
use aceradar_core::types::{BlipPlacement, Pose};

/// Radius floor applied before dividing, so a zero input radius cannot produce infinities.
pub const MIN_RADIUS: f64 = 1.0;

/// Observer-relative target offset, not yet divided by a viewport radius.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RelativeFix {
    /// Local X (right) and Z (forward), multiplied by the display constant.
    pub offset: DVec2,
    pub rotation_deg: f64,
}

impl RelativeFix {
    /// Placement on a viewport showing `radius` world units.
    pub fn placement(&self, radius: f64) -> BlipPlacement {
        BlipPlacement {
            position: self.offset / radius.max(MIN_RADIUS),
            rotation_deg: self.rotation_deg,
        }
    }
}

/// Rotate the world displacement into the observer's heading-aligned frame.
pub fn relative_fix(observer: &Pose, target: &Pose, rotatable: bool) -> RelativeFix {
    let to_local = DQuat::from_rotation_y(observer.heading_deg.to_radians()).inverse();
    let local = to_local * (target.position - observer.position);
    RelativeFix {
        offset: DVec2::new(local.x, local.z) * DISPLAY_UNITS_PER_RADIUS,
        rotation_deg: if rotatable {
            observer.heading_deg - target.heading_deg
        } else {
            0.0
        },
    }
}

/// One-shot transform for a single viewport.
pub fn project(observer: &Pose, target: &Pose, radius: f64, rotatable: bool) -> BlipPlacement {
    relative_fix(observer, target, rotatable).placement(radius)
}

/// Range ring scale for a viewport showing `radius` world units.
pub fn ring_scale(radius: f64) -> f64 {
    REFERENCE_RADIUS / radius.max(MIN_RADIUS)
}
