//! Radar snapshot: the complete visible state of the tracker after a frame.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{BlipPlacement, BlipStyle, TargetId, ViewportId};

/// Everything a front end needs to draw the radar, built read-only after a frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RadarSnapshot {
    /// Frames stepped since the registry was created.
    pub frame: u64,
    pub mode: SessionMode,
    /// Main viewport first, then auxiliary viewports in attach order.
    pub viewports: Vec<ViewportView>,
    /// Targets in registration order.
    pub targets: Vec<TargetView>,
}

/// One rendering destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportView {
    pub id: ViewportId,
    /// Current radar radius (world units).
    pub radius: f64,
    /// Range ring scale relative to the reference radius.
    pub ring_scale: f64,
    pub visible: bool,
    /// Whether the radius comes from an input value instead of the shared zoom.
    pub input_driven: bool,
}

/// One tracked target as seen on the main viewport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub id: TargetId,
    /// Bit pattern of the source entity handle.
    pub entity: u64,
    pub kind: EntityKind,
    pub category: TargetCategory,
    pub visible: bool,
    pub rotatable: bool,
    pub style: BlipStyle,
    pub placement: BlipPlacement,
    /// Number of auxiliary blips owned by the target.
    pub aux_blips: usize,
}
