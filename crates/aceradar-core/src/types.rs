//! Fundamental geometric and bookkeeping types.

use std::fmt;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::enums::SpriteId;

/// World-space pose of an entity.
///
/// Y is up; heading is the yaw in degrees, clockwise seen from above,
/// with 0 facing +Z. Roll and pitch are never tracked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec3,
    pub heading_deg: f64,
}

impl Pose {
    pub fn new(position: DVec3, heading_deg: f64) -> Self {
        Self {
            position,
            heading_deg,
        }
    }

    /// Distance to a world-space point.
    pub fn distance_to(&self, point: DVec3) -> f64 {
        self.position.distance(point)
    }
}

/// RGBA color, components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlipColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl BlipColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for BlipColor {
    fn default() -> Self {
        BlipColor::new(1.0, 1.0, 1.0, 0.5)
    }
}

/// Everything the canvas needs to draw one blip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BlipStyle {
    pub sprite: SpriteId,
    pub color: BlipColor,
}

/// Viewport-local blip transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BlipPlacement {
    /// Offset from the viewport center in display units (x = right, y = forward).
    pub position: DVec2,
    /// In-plane rotation in degrees.
    pub rotation_deg: f64,
}

/// Registry-issued handle for a tracked target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u32);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{:04}", self.0)
    }
}

/// Host-issued identity of an auxiliary display attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttachmentId(pub u64);

/// Stable identifier of a rendering destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViewportId {
    Main,
    Attachment(AttachmentId),
}

impl fmt::Display for ViewportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewportId::Main => f.write_str("main"),
            ViewportId::Attachment(id) => write!(f, "attachment#{}", id.0),
        }
    }
}

/// Canvas-issued handle for one renderable blip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlipId(pub u64);

/// Where an auxiliary viewport takes its radar radius from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum RadiusSource {
    /// Follows the main viewport's zoom controller.
    #[default]
    Shared,
    /// Driven by a live input value (world units), sampled every frame.
    Input(f64),
}

/// One auxiliary display attachment, as enumerated by the host this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttachmentInfo {
    pub id: AttachmentId,
    pub radius_source: RadiusSource,
    /// Canvas sort order, 0..=15.
    pub sort_order: u8,
    pub frame_color: BlipColor,
}

impl AttachmentInfo {
    /// Attachment following the shared zoom with default styling.
    pub fn shared(id: u64) -> Self {
        Self {
            id: AttachmentId(id),
            radius_source: RadiusSource::Shared,
            sort_order: 0,
            frame_color: BlipColor::new(1.0, 1.0, 1.0, 0.6),
        }
    }

    /// Attachment whose radius is driven by an input value.
    pub fn input_driven(id: u64, radius: f64) -> Self {
        Self {
            radius_source: RadiusSource::Input(radius),
            ..Self::shared(id)
        }
    }
}
